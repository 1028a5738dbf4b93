use thiserror::Error;

use crate::comments::FileVersionId;

/// Failures resolving stored revision text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevisionError {
    #[error("revision {0} not found")]
    RevisionNotFound(FileVersionId),
    #[error("base revision {base} not found (needed by revision {revision})")]
    BaseRevisionNotFound {
        revision: FileVersionId,
        base: FileVersionId,
    },
    #[error("revision {0} has a cyclic delta chain")]
    DeltaCycle(FileVersionId),
}
