//! Normal-format diff parsing, patched-text reconstruction and segmenting

mod cursor;
mod parse;
mod patched;
mod segment;

pub use cursor::{LineCursor, LineSource, TextLines, line_count};
pub use parse::{
    CHANGE_SEPARATOR, Hunk, HunkHeader, HunkLine, HunkOp, HunkTokenizer, NO_NEWLINE_MARKER,
    TokenizerState, parse_hunks,
};
pub use patched::{PatchedTextReader, apply_hunks};
pub use segment::{Segment, SegmentClassifier, SegmentKind, classify};
