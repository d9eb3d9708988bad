use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ui::highlight_line::HighlightedSpan;

/// Cells reserved for one line number.
pub const LINE_NUM_WIDTH: usize = 4;

const ELLIPSIS: char = '…';

/// Right-aligns a line number in [`LINE_NUM_WIDTH`] cells; blank when absent.
/// Numbers wider than the gutter are printed in full.
pub fn fmt_line_num(num: Option<u32>) -> String {
    match num {
        Some(n) => format!("{:>width$}", n, width = LINE_NUM_WIDTH),
        None => " ".repeat(LINE_NUM_WIDTH),
    }
}

/// Expands tabs to the next tab stop and replaces other control characters,
/// which have no display width, with a visible placeholder.
pub fn sanitize_content(s: &str, tab_width: usize) -> String {
    let tab_width = tab_width.max(1);
    let mut result = String::with_capacity(s.len());
    let mut col = 0;

    for ch in s.chars() {
        if ch == '\t' {
            let spaces = tab_width - (col % tab_width);
            result.extend(std::iter::repeat_n(' ', spaces));
            col += spaces;
        } else if ch.is_control() {
            result.push('\u{FFFD}');
            col += 1;
        } else {
            result.push(ch);
            col += ch.width().unwrap_or(0);
        }
    }

    result
}

/// Converts highlighter runs into spans over a diff row's base style.
///
/// Only the foreground and modifiers of `base` are replaced, so the row
/// background survives underneath the syntax colours.
pub fn styled_runs(runs: Vec<HighlightedSpan>, base: Style) -> Vec<Span<'static>> {
    runs.into_iter()
        .map(|run| {
            let mut style = base.add_modifier(run.modifier);
            if let Some(fg) = run.fg {
                style = style.fg(fg);
            }
            Span::styled(run.text, style)
        })
        .collect()
}

pub fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|s| s.content.width()).sum()
}

/// Makes `spans` exactly `width` cells wide.
///
/// Short input is padded with `fill`. Overflowing input is cut at a character
/// boundary and the last visible cell becomes an ellipsis drawn in the style
/// of the span that was cut.
pub fn fit_spans(spans: Vec<Span<'static>>, width: usize, fill: Style) -> Vec<Span<'static>> {
    let used = spans_width(&spans);
    if used <= width {
        let mut spans = spans;
        if used < width {
            spans.push(Span::styled(" ".repeat(width - used), fill));
        }
        return spans;
    }

    if width == 0 {
        return Vec::new();
    }

    let limit = width - 1;
    let mut out = Vec::with_capacity(spans.len());
    let mut col = 0;

    for span in spans {
        let span_width = span.content.width();
        if col + span_width <= limit {
            col += span_width;
            out.push(span);
            continue;
        }

        let mut cut = String::new();
        for ch in span.content.chars() {
            let w = ch.width().unwrap_or(0);
            if col + w > limit {
                break;
            }
            cut.push(ch);
            col += w;
        }
        // a wide character straddling the limit leaves a gap
        while col < limit {
            cut.push(' ');
            col += 1;
        }
        cut.push(ELLIPSIS);
        out.push(Span::styled(cut, span.style));
        break;
    }

    out
}

/// A row of `width` blank cells.
pub fn blank(width: usize, style: Style) -> Span<'static> {
    Span::styled(" ".repeat(width), style)
}

/// Flattens a rendered row to plain text.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::style::Color;

    #[test]
    fn test_fmt_line_num() {
        assert_eq!(fmt_line_num(None), "    ");
        assert_eq!(fmt_line_num(Some(0)), "   0");
        assert_eq!(fmt_line_num(Some(1)), "   1");
        assert_eq!(fmt_line_num(Some(9999)), "9999");
        assert_eq!(fmt_line_num(Some(10000)), "10000");
    }

    #[test]
    fn test_sanitize_expands_tabs_to_stops() {
        assert_eq!(sanitize_content("\tx", 4), "    x");
        assert_eq!(sanitize_content("ab\tc", 4), "ab  c");
        assert_eq!(sanitize_content("ab\tc", 8), "ab      c");
        assert_eq!(sanitize_content("a\u{1b}b", 4), "a\u{FFFD}b");
    }

    #[test]
    fn test_fit_spans_pads_with_fill_style() {
        let fill = Style::default().bg(Color::Green);
        let spans = fit_spans(vec![Span::raw("abc")], 6, fill);
        assert_eq!(spans_width(&spans), 6);
        assert_eq!(spans.last().unwrap().style, fill);
    }

    #[test]
    fn test_fit_spans_truncates_with_ellipsis() {
        let spans = fit_spans(
            vec![Span::raw("abc"), Span::raw("defgh")],
            6,
            Style::default(),
        );
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "abcde…");
        assert_eq!(spans_width(&spans), 6);
    }

    #[test]
    fn test_fit_spans_handles_wide_characters() {
        // each ideograph is two cells wide
        let spans = fit_spans(vec![Span::raw("日本語")], 4, Style::default());
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "日 …");
        assert_eq!(spans_width(&spans), 4);

        let exact = fit_spans(vec![Span::raw("日本")], 4, Style::default());
        assert_eq!(spans_width(&exact), 4);
    }

    #[test]
    fn test_fit_spans_zero_width() {
        assert!(fit_spans(vec![Span::raw("abc")], 0, Style::default()).is_empty());
    }

    #[test]
    fn test_styled_runs_keep_background() {
        let base = Style::default().fg(Color::White).bg(Color::Red);
        let runs = vec![
            HighlightedSpan {
                text: "fn".into(),
                fg: Some(Color::Magenta),
                modifier: ratatui::style::Modifier::BOLD,
            },
            HighlightedSpan::plain(" main"),
        ];
        let spans = styled_runs(runs, base);
        assert_eq!(spans[0].style.fg, Some(Color::Magenta));
        assert_eq!(spans[0].style.bg, Some(Color::Red));
        assert_eq!(spans[1].style.fg, Some(Color::White));
        assert_eq!(spans[1].style.bg, Some(Color::Red));
    }
}
