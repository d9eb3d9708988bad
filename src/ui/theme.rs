use ratatui::style::{Color, Style};

use crate::diff_file::DiffLineKind;

/// Colours used for the diff chrome. Syntax colours come from the syntect
/// theme named in `syntax_theme`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub fg: Color,
    pub added_fg: Color,
    pub added_bg: Color,
    pub removed_fg: Color,
    pub removed_bg: Color,
    pub hunk_fg: Color,
    pub hunk_bg: Color,
    pub line_num_fg: Color,
    pub line_num_added_fg: Color,
    pub line_num_removed_fg: Color,
    pub header_fg: Color,
    pub header_bg: Color,
    pub syntax_theme: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            fg: Color::Rgb(224, 224, 240),
            added_fg: Color::Rgb(166, 227, 161),
            added_bg: Color::Rgb(30, 58, 44),
            removed_fg: Color::Rgb(243, 139, 168),
            removed_bg: Color::Rgb(59, 29, 46),
            hunk_fg: Color::Rgb(108, 92, 231),
            hunk_bg: Color::Rgb(37, 38, 54),
            line_num_fg: Color::Rgb(88, 91, 112),
            line_num_added_fg: Color::Rgb(166, 227, 161),
            line_num_removed_fg: Color::Rgb(243, 139, 168),
            header_fg: Color::Rgb(198, 120, 221),
            header_bg: Color::Rgb(40, 42, 58),
            syntax_theme: "base16-ocean.dark",
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            fg: Color::Rgb(76, 79, 105),
            added_fg: Color::Rgb(26, 127, 42),
            added_bg: Color::Rgb(230, 245, 228),
            removed_fg: Color::Rgb(210, 15, 57),
            removed_bg: Color::Rgb(253, 228, 232),
            hunk_fg: Color::Rgb(30, 102, 245),
            hunk_bg: Color::Rgb(230, 233, 239),
            line_num_fg: Color::Rgb(156, 160, 176),
            line_num_added_fg: Color::Rgb(26, 127, 42),
            line_num_removed_fg: Color::Rgb(210, 15, 57),
            header_fg: Color::Rgb(136, 57, 239),
            header_bg: Color::Rgb(230, 233, 239),
            syntax_theme: "InspiredGitHub",
        }
    }

    pub fn names() -> &'static [&'static str] {
        &["dark", "light"]
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Background behind the whole row, `None` for context lines.
    pub fn background(&self, kind: DiffLineKind) -> Option<Color> {
        match kind {
            DiffLineKind::Added => Some(self.added_bg),
            DiffLineKind::Removed => Some(self.removed_bg),
            DiffLineKind::HunkHeader => Some(self.hunk_bg),
            DiffLineKind::Context => None,
        }
    }

    /// Background-only style used for padding and separators.
    pub fn fill_style(&self, kind: DiffLineKind) -> Style {
        match self.background(kind) {
            Some(bg) => Style::default().bg(bg),
            None => Style::default(),
        }
    }

    /// Style of the text column before syntax colours are applied.
    pub fn content_style(&self, kind: DiffLineKind) -> Style {
        let fg = match kind {
            DiffLineKind::Added => self.added_fg,
            DiffLineKind::Removed => self.removed_fg,
            DiffLineKind::HunkHeader => self.hunk_fg,
            DiffLineKind::Context => self.fg,
        };
        self.fill_style(kind).fg(fg)
    }

    pub fn line_number_style(&self, kind: DiffLineKind) -> Style {
        match kind {
            DiffLineKind::Added => Style::default()
                .fg(self.line_num_added_fg)
                .bg(self.added_bg),
            DiffLineKind::Removed => Style::default()
                .fg(self.line_num_removed_fg)
                .bg(self.removed_bg),
            _ => Style::default().fg(self.line_num_fg),
        }
    }

    pub fn hunk_style(&self) -> Style {
        Style::default().fg(self.hunk_fg).bg(self.hunk_bg)
    }

    pub fn header_style(&self) -> Style {
        Style::default().fg(self.header_fg).bg(self.header_bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        for name in Palette::names() {
            let palette = Palette::by_name(name).unwrap();
            assert_eq!(palette.name, *name);
        }
        assert!(Palette::by_name("neon").is_none());
        assert_eq!(Palette::default(), Palette::dark());
    }

    #[test]
    fn test_context_has_no_background() {
        let palette = Palette::dark();
        assert_eq!(palette.background(DiffLineKind::Context), None);
        assert_eq!(palette.fill_style(DiffLineKind::Context).bg, None);
        assert_eq!(
            palette.fill_style(DiffLineKind::Added).bg,
            Some(palette.added_bg)
        );
        assert_eq!(
            palette.content_style(DiffLineKind::Removed).bg,
            Some(palette.removed_bg)
        );
    }
}
