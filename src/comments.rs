//! Line-anchored review comments.
//!
//! Comments are loaded by the caller (usually from the review store) and
//! handed to the renderer as a read-only index keyed by file version and
//! line number.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one stored revision of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileVersionId(pub i64);

impl fmt::Display for FileVersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single review comment anchored to a line of a file version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: String,
    pub file_version_id: FileVersionId,
    pub line: usize,
    pub author: String,
    pub body: String,
    #[serde(default)]
    pub created_at: String,
}

/// Sparse `(file version, line) -> comments` lookup.
///
/// Per-line order is the order comments were supplied in.
#[derive(Debug, Clone, Default)]
pub struct CommentIndex {
    by_line: HashMap<(FileVersionId, usize), Vec<Comment>>,
    total: usize,
}

impl CommentIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_comments(comments: impl IntoIterator<Item = Comment>) -> Self {
        let mut index = Self::new();
        for comment in comments {
            index.total += 1;
            index
                .by_line
                .entry((comment.file_version_id, comment.line))
                .or_default()
                .push(comment);
        }
        index
    }

    /// Build an index from a JSON array of comments.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not an array of comment objects.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let comments: Vec<Comment> = serde_json::from_str(json)?;
        Ok(Self::from_comments(comments))
    }

    #[must_use]
    pub fn comments_at(&self, version: FileVersionId, line: usize) -> &[Comment] {
        self.by_line
            .get(&(version, line))
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
