//! critview - side-by-side and unified comparison rendering for code review
//!
//! Parses normal-format diff hunks, reconstructs patched text by streaming,
//! classifies the base file into segments and lays both revisions out as a
//! row plan with review comments attached.

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod comments;
pub mod comparison;
pub mod config;
pub mod diff;
pub mod encode;
pub mod errors;
pub mod layout;
pub mod render;
pub mod report;
pub mod revision;
pub mod syntax;
pub mod text;

pub use comments::{Comment, CommentIndex, FileVersionId};
pub use comparison::{ComparisonRequest, render_comparison, render_single_text, render_texts};
pub use config::{RenderConfig, ViewOptions};
pub use encode::{LineEncoder, PlainEncoder};
pub use errors::RevisionError;
pub use render::{AlignmentRenderer, Layout, LineCell, OmittedRun, RenderRow, RowGroup, RowPlan};
pub use revision::{MemoryRevisionStore, RevisionStore, StoredRevision, reconstruct};
pub use syntax::SyntaxEncoder;
