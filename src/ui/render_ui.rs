use ratatui::{
    style::Modifier,
    text::{Line, Span, Text},
};

use crate::{
    diff_file::{DiffLine, DiffLineKind, ParsedDiff},
    pairing::PairingStrategy,
    parser::{parse_diff, split_files},
    ui::{
        diff_utils::{fit_spans, sanitize_content, styled_runs},
        highlight_line::Highlighter,
        side_by_side_diff::render_side_by_side_diff,
        theme::Palette,
        unified_diff::render_unified_diff,
    },
};

/// Narrowest width at which two panels are still readable.
pub const MIN_SPLIT_WIDTH: usize = 120;

pub const BINARY_PLACEHOLDER: &str = "  Binary file — cannot display diff";

const HUNK_MARKER: &str = "    ···  ";

pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Turns parsed diffs into fixed-width styled rows.
///
/// The renderer borrows its [`Highlighter`] so one syntax cache can serve
/// every file of a commit. Each render call is independent; the same input
/// always yields the same rows.
#[derive(Debug, Clone)]
pub struct DiffRenderer<'a> {
    highlighter: &'a Highlighter,
    palette: Palette,
    tab_width: usize,
    pairing: PairingStrategy,
}

impl<'a> DiffRenderer<'a> {
    pub fn new(highlighter: &'a Highlighter, palette: Palette) -> Self {
        Self {
            highlighter,
            palette,
            tab_width: DEFAULT_TAB_WIDTH,
            pairing: PairingStrategy::default(),
        }
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    pub fn with_pairing(mut self, pairing: PairingStrategy) -> Self {
        self.pairing = pairing;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn pairing(&self) -> PairingStrategy {
        self.pairing
    }

    /// Inline layout.
    pub fn render(&self, parsed: &ParsedDiff, filename: &str, width: usize) -> Text<'static> {
        if parsed.is_binary() {
            return self.render_binary_file(width);
        }
        log::debug!(
            "inline render of {} lines for {:?} at width {}",
            parsed.line_count(),
            filename,
            width
        );
        Text::from(render_unified_diff(self, parsed.lines(), filename, width))
    }

    /// Side-by-side layout, old on the left and new on the right.
    pub fn render_split(&self, parsed: &ParsedDiff, filename: &str, width: usize) -> Text<'static> {
        if parsed.is_binary() {
            return self.render_binary_file(width);
        }
        log::debug!(
            "split render of {} lines for {:?} at width {} ({:?} pairing)",
            parsed.line_count(),
            filename,
            width,
            self.pairing
        );
        Text::from(render_side_by_side_diff(
            self,
            parsed.lines(),
            filename,
            width,
        ))
    }

    /// Split when asked and the width allows two panels, inline otherwise.
    pub fn render_auto(
        &self,
        parsed: &ParsedDiff,
        filename: &str,
        width: usize,
        prefer_split: bool,
    ) -> Text<'static> {
        if prefer_split && width >= MIN_SPLIT_WIDTH {
            self.render_split(parsed, filename, width)
        } else {
            if prefer_split {
                log::debug!(
                    "width {} below {}, falling back to inline",
                    width,
                    MIN_SPLIT_WIDTH
                );
            }
            self.render(parsed, filename, width)
        }
    }

    /// Untracked file: every line is an addition.
    pub fn render_new_file(&self, content: &str, filename: &str, width: usize) -> Text<'static> {
        self.render(&ParsedDiff::from_new_file(content), filename, width)
    }

    pub fn render_new_file_split(
        &self,
        content: &str,
        filename: &str,
        width: usize,
    ) -> Text<'static> {
        self.render_split(&ParsedDiff::from_new_file(content), filename, width)
    }

    pub fn render_binary_file(&self, width: usize) -> Text<'static> {
        let style = self.palette.hunk_style();
        Text::from(Line::from(fit_spans(
            vec![Span::styled(BINARY_PLACEHOLDER, style)],
            width,
            style,
        )))
    }

    /// A multi-file diff: a banner row per file followed by its diff.
    pub fn render_commit(&self, raw: &str, width: usize, split: bool) -> Text<'static> {
        let mut lines = Vec::new();

        for section in split_files(raw) {
            if !section.path.is_empty() {
                lines.push(self.file_banner(&section.path, width));
            }
            let parsed = parse_diff(&section.raw);
            let rendered = self.render_auto(&parsed, &section.path, width, split);
            lines.extend(rendered.lines);
        }

        Text::from(lines)
    }

    fn file_banner(&self, path: &str, width: usize) -> Line<'static> {
        let style = self.palette.header_style();
        Line::from(fit_spans(
            vec![Span::styled(
                format!(" {}", sanitize_content(path, self.tab_width)),
                style.add_modifier(Modifier::BOLD),
            )],
            width,
            style,
        ))
    }

    /// Hunk header bar: marker, then the hunk context, padded to `width`.
    pub(crate) fn hunk_spans(&self, diff_line: &DiffLine, width: usize) -> Vec<Span<'static>> {
        let hunk_style = self.palette.hunk_style();
        let mut spans = vec![Span::styled(
            HUNK_MARKER,
            self.palette.line_number_style(DiffLineKind::HunkHeader),
        )];
        if !diff_line.content.is_empty() {
            spans.push(Span::styled(
                format!(" {}", sanitize_content(&diff_line.content, self.tab_width)),
                hunk_style,
            ));
        }
        fit_spans(spans, width, hunk_style)
    }

    /// Highlighted code column of a line over the line kind's style.
    pub(crate) fn content_spans(&self, diff_line: &DiffLine, filename: &str) -> Vec<Span<'static>> {
        let text = sanitize_content(&diff_line.content, self.tab_width);
        let runs = self.highlighter.highlight(&text, filename);
        styled_runs(runs, self.palette.content_style(diff_line.kind))
    }
}
