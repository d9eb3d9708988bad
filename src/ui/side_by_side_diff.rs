use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::{
    diff_file::{DiffLine, SplitLine},
    pairing::pair_lines_with,
    ui::{
        diff_utils::{blank, fit_spans, fmt_line_num, spans_width},
        render_ui::DiffRenderer,
    },
};

pub const PANEL_SEPARATOR: &str = "│";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Old,
    New,
}

/// Widths of the old and new panels; the separator takes the remaining cell.
pub fn panel_widths(width: usize) -> (usize, usize) {
    let inner = width.saturating_sub(1);
    let left = inner / 2;
    (left, inner - left)
}

pub fn render_side_by_side_diff(
    renderer: &DiffRenderer<'_>,
    lines: &[DiffLine],
    filename: &str,
    width: usize,
) -> Vec<Line<'static>> {
    pair_lines_with(lines, renderer.pairing())
        .iter()
        .map(|pair| render_split_row(renderer, pair, filename, width))
        .collect()
}

fn render_split_row(
    renderer: &DiffRenderer<'_>,
    pair: &SplitLine,
    filename: &str,
    width: usize,
) -> Line<'static> {
    let (left_width, right_width) = panel_widths(width);

    if let Some(header) = pair.left.as_ref().filter(|l| l.is_hunk_header()) {
        return render_split_hunk_header(renderer, header, width, left_width, right_width);
    }

    let separator = Span::styled(PANEL_SEPARATOR, separator_style(renderer));
    let mut spans = render_split_side(renderer, pair.left.as_ref(), filename, left_width, Side::Old);
    spans.push(separator);
    spans.extend(render_split_side(
        renderer,
        pair.right.as_ref(),
        filename,
        right_width,
        Side::New,
    ));

    Line::from(fit_spans(spans, width, Style::default()))
}

/// One hunk bar across both panels. The hunk text stays inside the old
/// panel and the separator keeps its column.
fn render_split_hunk_header(
    renderer: &DiffRenderer<'_>,
    header: &DiffLine,
    width: usize,
    left_width: usize,
    right_width: usize,
) -> Line<'static> {
    let hunk_style = renderer.palette().hunk_style();
    let mut spans = renderer.hunk_spans(header, left_width);
    spans.push(Span::styled(
        PANEL_SEPARATOR,
        separator_style(renderer).bg(renderer.palette().hunk_bg),
    ));
    spans.push(blank(right_width, hunk_style));

    Line::from(fit_spans(spans, width, hunk_style))
}

fn render_split_side(
    renderer: &DiffRenderer<'_>,
    diff_line: Option<&DiffLine>,
    filename: &str,
    panel_width: usize,
    side: Side,
) -> Vec<Span<'static>> {
    let Some(diff_line) = diff_line else {
        return vec![blank(panel_width, Style::default())];
    };

    let palette = renderer.palette();
    let kind = diff_line.kind;
    let fill = palette.fill_style(kind);

    let num = match side {
        Side::Old => diff_line.old_line_number,
        Side::New => diff_line.new_line_number,
    };

    let mut spans = vec![
        Span::styled(format!("{} ", fmt_line_num(num)), palette.line_number_style(kind)),
        Span::styled(format!("{} ", kind.indicator()), palette.content_style(kind)),
    ];
    let available = panel_width.saturating_sub(spans_width(&spans));
    spans.extend(fit_spans(
        renderer.content_spans(diff_line, filename),
        available,
        fill,
    ));

    fit_spans(spans, panel_width, fill)
}

fn separator_style(renderer: &DiffRenderer<'_>) -> Style {
    Style::default().fg(renderer.palette().line_num_fg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{diff_utils::line_text, highlight_line::Highlighter, theme::Palette};
    use pretty_assertions::assert_eq;

    fn render(lines: &[DiffLine], width: usize) -> Vec<Line<'static>> {
        let highlighter = Highlighter::plain();
        let renderer = DiffRenderer::new(&highlighter, Palette::dark());
        render_side_by_side_diff(&renderer, lines, "main.go", width)
    }

    #[test]
    fn test_panel_widths() {
        assert_eq!(panel_widths(121), (60, 60));
        assert_eq!(panel_widths(120), (59, 60));
        assert_eq!(panel_widths(0), (0, 0));
    }

    #[test]
    fn test_empty_side_is_blank() {
        let highlighter = Highlighter::plain();
        let renderer = DiffRenderer::new(&highlighter, Palette::dark());
        let spans = render_split_side(&renderer, None, "x.go", 40, Side::Old);
        assert_eq!(spans_width(&spans), 40);
        assert_eq!(line_text(&Line::from(spans)).trim(), "");
    }

    #[test]
    fn test_context_row_is_symmetric() {
        let rows = render(&[DiffLine::context("same", 3, 7)], 41);
        let text = line_text(&rows[0]);
        let (left, right) = text.split_once(PANEL_SEPARATOR).unwrap();
        assert_eq!(left, format!("   3   same{}", " ".repeat(9)));
        assert_eq!(right, format!("   7   same{}", " ".repeat(9)));
    }

    #[test]
    fn test_edit_pairs_side_by_side() {
        let rows = render(
            &[DiffLine::removed("old", 1), DiffLine::added("new", 1)],
            81,
        );
        assert_eq!(rows.len(), 1);
        let text = line_text(&rows[0]);
        let (left, right) = text.split_once(PANEL_SEPARATOR).unwrap();
        assert!(left.starts_with("   1 - old"));
        assert!(right.starts_with("   1 + new"));
    }

    #[test]
    fn test_every_row_has_separator_and_full_width() {
        let rows = render(
            &[
                DiffLine::hunk_header("func main()"),
                DiffLine::context("a", 1, 1),
                DiffLine::removed("b", 2),
                DiffLine::added("c", 2),
                DiffLine::added("d", 3),
            ],
            120,
        );
        assert_eq!(rows.len(), 4);
        for row in &rows {
            assert_eq!(row.width(), 120);
            assert!(line_text(row).contains(PANEL_SEPARATOR));
        }
        assert!(line_text(&rows[0]).contains("func main()"));
    }

    #[test]
    fn test_long_hunk_header_stays_in_old_panel() {
        let context = "x".repeat(80);
        let rows = render(&[DiffLine::hunk_header(&context)], 81);
        let text = line_text(&rows[0]);
        assert_eq!(rows[0].width(), 81);

        let (left, right) = text.split_once(PANEL_SEPARATOR).unwrap();
        assert_eq!(left.chars().count(), 40);
        assert!(left.ends_with('…'));
        assert_eq!(right, " ".repeat(40));
        assert_eq!(
            rows[0].spans.last().unwrap().style.bg,
            Some(Palette::dark().hunk_bg)
        );
    }
}
