//! Renders unified diffs as styled, fixed-width terminal rows.
//!
//! Raw diff text is parsed into [`ParsedDiff`], optionally paired into
//! side-by-side rows, and drawn by [`DiffRenderer`] into a ratatui
//! [`Text`](ratatui::text::Text). [`to_ansi_string`] turns that into escape
//! sequences for a plain terminal.
//!
//! ```no_run
//! use diffpane::{DiffRenderer, Highlighter, Palette, parse_diff, to_ansi_string};
//!
//! let palette = Palette::dark();
//! let highlighter = Highlighter::new(palette.syntax_theme);
//! let renderer = DiffRenderer::new(&highlighter, palette);
//! let parsed = parse_diff("@@ -1 +1 @@\n-old\n+new\n");
//! print!("{}", to_ansi_string(&renderer.render_split(&parsed, "main.rs", 120)));
//! ```

pub mod ansi;
pub mod app;
pub mod config;
pub mod diff_file;
pub mod pairing;
pub mod parser;
pub mod ui;


pub use ansi::{to_ansi_string, write_text};
pub use config::{Config, ConfigError};
pub use diff_file::{DiffLine, DiffLineKind, FileSection, ParsedDiff, SplitLine};
pub use pairing::{PairingStrategy, pair_lines, pair_lines_with};
pub use parser::{
    LineCounters, MAX_DIFF_LINES, classify_line, extract_filename, extract_hunk_context,
    parse_diff, parse_hunk_header, split_files,
};
pub use ui::{DiffRenderer, HighlightedSpan, Highlighter, MIN_SPLIT_WIDTH, Palette};
