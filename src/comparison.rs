//! Comparison entry point: revision texts in, row plan out.

use tracing::debug;

use crate::comments::{CommentIndex, FileVersionId};
use crate::config::{RenderConfig, ViewOptions};
use crate::diff::{LineCursor, PatchedTextReader, SegmentClassifier, line_count};
use crate::encode::LineEncoder;
use crate::errors::RevisionError;
use crate::render::{AlignmentRenderer, RowPlan};
use crate::revision::{RevisionStore, reconstruct};

/// One reviewer request to compare two file versions.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonRequest<'a> {
    pub base_revision: FileVersionId,
    pub diff_revision: FileVersionId,
    /// Normal-format hunks turning the base into the diff revision
    pub hunks: &'a str,
    pub options: ViewOptions,
}

impl ComparisonRequest<'_> {
    #[must_use]
    pub fn is_single_revision(&self) -> bool {
        self.base_revision == self.diff_revision
    }
}

/// Render base text against diff text under `hunk_text`.
///
/// Without `diff_text` the diff side is streamed from the base through a
/// [`PatchedTextReader`] over the same hunks the segments came from.
pub fn render_texts(
    renderer: &AlignmentRenderer<'_>,
    base_text: &str,
    diff_text: Option<&str>,
    hunk_text: &str,
) -> RowPlan {
    let classifier = SegmentClassifier::parse(hunk_text);
    let segments = classifier.segments(line_count(base_text));
    let mut base = LineCursor::over_text(base_text);

    if let Some(diff_text) = diff_text {
        return renderer.render(&segments, &mut base, &mut LineCursor::over_text(diff_text));
    }

    let patched = PatchedTextReader::from_hunks(
        LineCursor::over_text(base_text),
        classifier.hunks().iter().cloned(),
    );
    renderer.render(&segments, &mut base, &mut LineCursor::new(patched))
}

/// Render one text on its own.
pub fn render_single_text(renderer: &AlignmentRenderer<'_>, text: &str) -> RowPlan {
    let segments = SegmentClassifier::default().segments(line_count(text));
    renderer.render_single(&segments, &mut LineCursor::over_text(text))
}

/// Resolve both revisions from `store` and render the comparison.
///
/// A diff revision that is not stored is materialized from the base and the
/// request's hunks.
///
/// # Errors
///
/// Returns a [`RevisionError`] when the base revision, or any revision in a
/// stored delta chain, cannot be resolved.
pub fn render_comparison(
    store: &impl RevisionStore,
    request: &ComparisonRequest<'_>,
    comments: &CommentIndex,
    encoder: &dyn LineEncoder,
    config: &RenderConfig,
) -> Result<RowPlan, RevisionError> {
    let renderer = AlignmentRenderer::new(comments, encoder, config)
        .with_options(request.options)
        .with_versions(request.base_revision, request.diff_revision);

    let base_text = reconstruct(store, request.base_revision)?;
    if request.is_single_revision() {
        return Ok(render_single_text(&renderer, &base_text));
    }

    let diff_text = match reconstruct(store, request.diff_revision) {
        Ok(text) => Some(text),
        Err(RevisionError::RevisionNotFound(id)) if id == request.diff_revision => {
            debug!(revision = %id, "diff revision not stored, applying hunks to base");
            None
        }
        Err(err) => return Err(err),
    };

    Ok(render_texts(
        &renderer,
        &base_text,
        diff_text.as_deref(),
        request.hunks,
    ))
}
