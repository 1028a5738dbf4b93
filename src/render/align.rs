//! Line collection from cursors and index pairing.

use crate::comments::{Comment, CommentIndex, FileVersionId};
use crate::diff::{LineCursor, LineSource};

/// One line read from a cursor with the comments anchored on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct LineEntry {
    pub line_number: usize,
    pub text: String,
    pub comments: Vec<Comment>,
}

/// Read up to `count` lines from `cursor`, stopping early at EOF.
pub(super) fn collect_entries<S: LineSource>(
    cursor: &mut LineCursor<S>,
    count: usize,
    index: &CommentIndex,
    version: FileVersionId,
) -> Vec<LineEntry> {
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(text) = cursor.advance().map(str::to_owned) else {
            break;
        };
        let line_number = cursor.line_number();
        entries.push(LineEntry {
            line_number,
            text,
            comments: index.comments_at(version, line_number).to_vec(),
        });
    }
    entries
}

/// Base and diff entries sharing one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PairedLine {
    pub base: Option<LineEntry>,
    pub diff: Option<LineEntry>,
}

impl PairedLine {
    pub fn has_comments(&self) -> bool {
        [&self.base, &self.diff]
            .into_iter()
            .flatten()
            .any(|entry| !entry.comments.is_empty())
    }
}

/// Pair entries by position; the shorter side is padded with `None`.
pub(super) fn pair_entries(base: Vec<LineEntry>, diff: Vec<LineEntry>) -> Vec<PairedLine> {
    let rows = base.len().max(diff.len());
    let mut base = base.into_iter();
    let mut diff = diff.into_iter();
    (0..rows)
        .map(|_| PairedLine {
            base: base.next(),
            diff: diff.next(),
        })
        .collect()
}
