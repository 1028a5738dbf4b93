//! Centralized layout constants.
//!
//! Defaults for context elision and line encoding live here so the config
//! defaults, the renderer and the text report agree.

// --- Context elision ---

/// Lines kept visible on each side of a comment or file boundary.
pub const DEFAULT_CONTEXT_WINDOW: usize = 50;

/// Unchanged segments with more rows than this are candidates for elision.
pub const DEFAULT_ELISION_THRESHOLD: usize = 100;

// --- Line encoding ---

/// 0 keeps whole lines.
pub const DEFAULT_MAX_LINE_WIDTH: usize = 0;
pub const DEFAULT_TAB_REPLACEMENT: &str = "    ";

// --- Text report ---

pub const REPORT_LINE_NUM_WIDTH: usize = 5;
pub const REPORT_MAX_COLUMN_WIDTH: usize = 80;
pub const REPORT_COMMENT_INDENT: usize = 8;

/// Width of the left column of a split report, given the widest left cell.
pub fn split_column_width(widest_left: usize) -> usize {
    widest_left.min(REPORT_MAX_COLUMN_WIDTH)
}
