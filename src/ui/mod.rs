pub mod diff_utils;
pub mod highlight_line;
pub mod render_ui;
pub mod side_by_side_diff;
pub mod theme;
pub mod unified_diff;

pub use highlight_line::{HighlightedSpan, Highlighter};
pub use render_ui::{BINARY_PLACEHOLDER, DiffRenderer, MIN_SPLIT_WIDTH};
pub use theme::Palette;
