use ratatui::text::{Line, Span};

use crate::{
    diff_file::{DiffLine, DiffLineKind},
    ui::{
        diff_utils::{LINE_NUM_WIDTH, fit_spans, fmt_line_num, spans_width},
        render_ui::DiffRenderer,
    },
};

/// Inline layout: `old new ± content`, one row per diff line.
pub fn render_unified_diff(
    renderer: &DiffRenderer<'_>,
    lines: &[DiffLine],
    filename: &str,
    width: usize,
) -> Vec<Line<'static>> {
    lines
        .iter()
        .map(|diff_line| match diff_line.kind {
            DiffLineKind::HunkHeader => Line::from(renderer.hunk_spans(diff_line, width)),
            DiffLineKind::Context | DiffLineKind::Added | DiffLineKind::Removed => {
                render_diff_line(renderer, diff_line, filename, width)
            }
        })
        .collect()
}

/// Content column width left after both gutters, the indicator and the
/// separators around them.
pub fn code_width(width: usize) -> usize {
    width.saturating_sub(LINE_NUM_WIDTH * 2 + 4)
}

fn render_diff_line(
    renderer: &DiffRenderer<'_>,
    diff_line: &DiffLine,
    filename: &str,
    width: usize,
) -> Line<'static> {
    let palette = renderer.palette();
    let kind = diff_line.kind;
    let fill = palette.fill_style(kind);

    let line_num_text = format!(
        "{} {} ",
        fmt_line_num(diff_line.old_line_number),
        fmt_line_num(diff_line.new_line_number)
    );

    let mut spans = vec![
        Span::styled(line_num_text, palette.line_number_style(kind)),
        Span::styled(format!("{} ", kind.indicator()), palette.content_style(kind)),
    ];

    // oversized line numbers push the content column right instead of
    // overflowing the row
    let available = width.saturating_sub(spans_width(&spans));
    spans.extend(fit_spans(
        renderer.content_spans(diff_line, filename),
        available,
        fill,
    ));

    Line::from(fit_spans(spans, width, fill))
}
