use std::collections::HashMap;
use std::path::Path;

use parking_lot::RwLock;
use ratatui::style::{Color, Modifier};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style as SyntectStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

const FALLBACK_THEME: &str = "base16-ocean.dark";

/// A run of text with the foreground it should be drawn in.
///
/// `fg` is `None` when the token has no colour of its own; the renderer then
/// uses the diff line's default foreground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedSpan {
    pub text: String,
    pub fg: Option<Color>,
    pub modifier: Modifier,
}

impl HighlightedSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: None,
            modifier: Modifier::empty(),
        }
    }
}

/// Syntax highlighter for single diff lines.
///
/// Holds the syntax definitions, the active syntect theme and a cache mapping
/// file extensions to syntax indices. The cache only ever grows.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Option<Theme>,
    syntax_cache: RwLock<HashMap<String, usize>>,
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("has_theme", &self.theme.is_some())
            .field("cached_extensions", &self.syntax_cache.read().len())
            .finish()
    }
}

impl Highlighter {
    pub fn new(theme_name: &str) -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = match theme_set.themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                log::warn!(
                    "unknown syntax theme {:?}, falling back to {}",
                    theme_name,
                    FALLBACK_THEME
                );
                theme_set.themes.remove(FALLBACK_THEME).unwrap_or_default()
            }
        };

        Self::with_theme(theme)
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_nonewlines(),
            theme: Some(theme),
            syntax_cache: RwLock::new(HashMap::new()),
        }
    }

    /// A highlighter without a palette: every line passes through uncoloured.
    pub fn plain() -> Self {
        Self {
            syntax_set: SyntaxSet::new(),
            theme: None,
            syntax_cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn cached_extensions(&self) -> usize {
        self.syntax_cache.read().len()
    }

    /// Splits `text` into coloured runs using the syntax picked from `filename`.
    pub fn highlight(&self, text: &str, filename: &str) -> Vec<HighlightedSpan> {
        let Some(theme) = self.theme.as_ref() else {
            return vec![HighlightedSpan::plain(text)];
        };
        if text.is_empty() {
            return vec![HighlightedSpan::plain(text)];
        }

        let syntax = self.syntax_for_file(filename);
        let default_fg = theme.settings.foreground;
        let mut highlighter = HighlightLines::new(syntax, theme);

        match highlighter.highlight_line(text, &self.syntax_set) {
            Ok(ranges) => ranges
                .into_iter()
                .filter(|(_, run)| !run.is_empty())
                .map(|(style, run)| syntect_style_to_span(style, run, default_fg))
                .collect(),
            Err(err) => {
                log::debug!("highlighting failed for {}: {}", filename, err);
                vec![HighlightedSpan::plain(text)]
            }
        }
    }

    fn syntax_for_file(&self, filename: &str) -> &SyntaxReference {
        let key = extension_key(filename);

        let cached = self.syntax_cache.read().get(&key).copied();
        if let Some(syntax) = cached.and_then(|idx| self.syntax_set.syntaxes().get(idx)) {
            return syntax;
        }

        let syntax = self.lookup_syntax(&key, filename);
        let idx = self
            .syntax_set
            .syntaxes()
            .iter()
            .position(|s| std::ptr::eq(s, syntax))
            .unwrap_or(0);

        log::debug!("syntax for {:?}: {}", key, syntax.name);
        self.syntax_cache.write().insert(key, idx);
        syntax
    }

    fn lookup_syntax(&self, key: &str, filename: &str) -> &SyntaxReference {
        let alias = match key {
            // TypeScript isn't in default syntect, use JavaScript syntax
            "ts" | "tsx" | "jsx" | "mjs" | "cjs" => Some("js"),
            "cc" | "cxx" | "hh" => Some("cpp"),
            "hpp" => Some("h"),
            _ => None,
        };

        alias
            .and_then(|ext| self.syntax_set.find_syntax_by_extension(ext))
            .or_else(|| self.syntax_set.find_syntax_by_extension(key))
            .or_else(|| {
                // `Makefile` and friends are listed as extensions by syntect;
                // the path itself is never opened
                Path::new(filename)
                    .file_name()
                    .and_then(|name| name.to_str())
                    .and_then(|name| self.syntax_set.find_syntax_by_extension(name))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

/// Lower-cased extension, or the whole base name when there is none
/// (so `Makefile` and `Dockerfile` get their own cache entries).
fn extension_key(filename: &str) -> String {
    let path = Path::new(filename);
    path.extension()
        .or_else(|| path.file_name())
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn syntect_style_to_span(
    style: SyntectStyle,
    text: &str,
    default_fg: Option<syntect::highlighting::Color>,
) -> HighlightedSpan {
    let fg = if Some(style.foreground) == default_fg {
        None
    } else {
        Some(Color::Rgb(
            style.foreground.r,
            style.foreground.g,
            style.foreground.b,
        ))
    };

    let mut modifier = Modifier::empty();
    if style.font_style.contains(FontStyle::BOLD) {
        modifier |= Modifier::BOLD;
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        modifier |= Modifier::ITALIC;
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        modifier |= Modifier::UNDERLINED;
    }

    HighlightedSpan {
        text: text.to_string(),
        fg,
        modifier,
    }
}
