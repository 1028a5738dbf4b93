//! Stored revision text and stacked-delta reconstruction.
//!
//! A revision is stored either as full text or as normal-format hunks against
//! an earlier revision. Reconstruction walks the delta chain down to a full
//! revision and stacks one [`PatchedTextReader`] per delta on top of it.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::comments::FileVersionId;
use crate::diff::{LineCursor, LineSource, PatchedTextReader, TextLines};
use crate::errors::RevisionError;

/// How one revision's text is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredRevision {
    Full(String),
    /// Hunks that turn `base` into this revision
    Delta {
        base: FileVersionId,
        hunks: String,
    },
}

/// Lookup of stored revisions, implemented by the persistence layer.
pub trait RevisionStore {
    fn fetch(&self, id: FileVersionId) -> Option<StoredRevision>;
}

/// In-memory [`RevisionStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryRevisionStore {
    revisions: HashMap<FileVersionId, StoredRevision>,
}

impl MemoryRevisionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_full(&mut self, id: FileVersionId, text: impl Into<String>) {
        self.revisions.insert(id, StoredRevision::Full(text.into()));
    }

    pub fn insert_delta(
        &mut self,
        id: FileVersionId,
        base: FileVersionId,
        hunks: impl Into<String>,
    ) {
        self.revisions.insert(
            id,
            StoredRevision::Delta {
                base,
                hunks: hunks.into(),
            },
        );
    }
}

impl RevisionStore for MemoryRevisionStore {
    fn fetch(&self, id: FileVersionId) -> Option<StoredRevision> {
        self.revisions.get(&id).cloned()
    }
}

/// Full text at the bottom of a chain plus the deltas above it, newest first.
struct DeltaChain {
    full: String,
    deltas: Vec<String>,
}

fn resolve_chain(
    store: &impl RevisionStore,
    id: FileVersionId,
) -> Result<DeltaChain, RevisionError> {
    let mut deltas = Vec::new();
    let mut seen = HashSet::new();
    let mut current = id;

    loop {
        if !seen.insert(current) {
            return Err(RevisionError::DeltaCycle(id));
        }
        let stored = store.fetch(current).ok_or(if current == id {
            RevisionError::RevisionNotFound(id)
        } else {
            RevisionError::BaseRevisionNotFound {
                revision: id,
                base: current,
            }
        })?;

        match stored {
            StoredRevision::Full(full) => return Ok(DeltaChain { full, deltas }),
            StoredRevision::Delta { base, hunks } => {
                deltas.push(hunks);
                current = base;
            }
        }
    }
}

/// Reconstruct the full text of revision `id`.
///
/// Every line of the result is newline-terminated.
///
/// # Errors
///
/// Returns [`RevisionError::RevisionNotFound`] if `id` is not stored,
/// [`RevisionError::BaseRevisionNotFound`] if a delta's base is missing and
/// [`RevisionError::DeltaCycle`] if the chain loops.
pub fn reconstruct(store: &impl RevisionStore, id: FileVersionId) -> Result<String, RevisionError> {
    let chain = resolve_chain(store, id)?;
    debug!(revision = %id, deltas = chain.deltas.len(), "reconstructing revision");

    let mut source: Box<dyn LineSource + '_> = Box::new(TextLines::new(&chain.full));
    for hunks in chain.deltas.iter().rev() {
        source = Box::new(PatchedTextReader::new(LineCursor::new(source), hunks));
    }

    let mut text = String::new();
    while let Some(line) = source.read_line() {
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const V1: FileVersionId = FileVersionId(1);
    const V2: FileVersionId = FileVersionId(2);
    const V3: FileVersionId = FileVersionId(3);

    #[test]
    fn test_full_revision() {
        let mut store = MemoryRevisionStore::new();
        store.insert_full(V1, "a\nb");

        assert_eq!(reconstruct(&store, V1), Ok("a\nb\n".to_string()));
    }

    #[test]
    fn test_stacked_deltas() {
        let mut store = MemoryRevisionStore::new();
        store.insert_full(V1, "a\nb\nc\n");
        store.insert_delta(V2, V1, "2c2\n< b\n---\n> B\n");
        store.insert_delta(V3, V2, "0a1\n> top\n3d3\n< c\n");

        assert_eq!(reconstruct(&store, V2).as_deref(), Ok("a\nB\nc\n"));
        assert_eq!(reconstruct(&store, V3).as_deref(), Ok("top\na\nB\n"));
    }

    #[test]
    fn test_missing_revision() {
        let store = MemoryRevisionStore::new();
        assert_eq!(reconstruct(&store, V1), Err(RevisionError::RevisionNotFound(V1)));
    }

    #[test]
    fn test_missing_base_revision() {
        let mut store = MemoryRevisionStore::new();
        store.insert_delta(V3, V2, "1d0\n< a\n");

        let err = reconstruct(&store, V3).expect_err("base is missing");
        assert_eq!(
            err,
            RevisionError::BaseRevisionNotFound {
                revision: V3,
                base: V2
            }
        );
        assert_eq!(err.to_string(), "base revision 2 not found (needed by revision 3)");
    }

    #[test]
    fn test_cyclic_chain() {
        let mut store = MemoryRevisionStore::new();
        store.insert_delta(V1, V2, "");
        store.insert_delta(V2, V1, "");

        assert_eq!(reconstruct(&store, V1), Err(RevisionError::DeltaCycle(V1)));
    }
}
