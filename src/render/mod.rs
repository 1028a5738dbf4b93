//! Alignment rendering
//!
//! Turns a segment sequence plus base/diff line cursors and a comment index
//! into a [`RowPlan`]: rows grouped per segment, paired for the chosen
//! layout, with long unchanged runs collapsed around comments.
//!
//! Sub-modules:
//! - `align`: cursor collection and index pairing
//! - `context`: context windows and omitted-run markers
//! - `side_by_side`: split layout rows
//! - `unified`: unified and single-revision rows

mod align;
mod context;
mod side_by_side;
mod unified;

use serde::Serialize;
use tracing::debug;

use crate::comments::{Comment, CommentIndex, FileVersionId};
use crate::config::{RenderConfig, ViewOptions};
use crate::diff::{LineCursor, LineSource, Segment, SegmentKind};
use crate::encode::LineEncoder;

use align::{LineEntry, collect_entries, pair_entries};
use context::{ElisionPolicy, elide};

// ---------------------------------------------------------------------------
// Row plan types
// ---------------------------------------------------------------------------

/// One side of a split row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineCell {
    pub line_number: usize,
    pub markup: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

/// Marker standing in for a run of elided unchanged lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OmittedRun {
    /// First base line of the run
    pub base_start: usize,
    /// First diff line of the run (absent in single-revision mode)
    pub diff_start: Option<usize>,
    pub count: usize,
}

impl OmittedRun {
    #[must_use]
    pub fn label(&self) -> String {
        format!("··· {} lines omitted · show entire file ···", self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum RenderRow {
    /// Two-column row; which side holds the base depends on the layout
    Split {
        left: Option<LineCell>,
        right: Option<LineCell>,
    },
    /// One-column row. Unchanged lines carry both numbers.
    Unified {
        base_line: Option<usize>,
        diff_line: Option<usize>,
        markup: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        comments: Vec<Comment>,
    },
    Omitted(OmittedRun),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Split { base_on_left: bool },
    Unified,
    SingleRevision,
}

/// Rows produced for one segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowGroup {
    pub kind: SegmentKind,
    pub rows: Vec<RenderRow>,
}

/// The complete, ordered rendering of one comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowPlan {
    pub layout: Layout,
    pub groups: Vec<RowGroup>,
}

impl RowPlan {
    pub fn rows(&self) -> impl Iterator<Item = &RenderRow> {
        self.groups.iter().flat_map(|group| group.rows.iter())
    }

    /// Total lines hidden behind omitted-run markers.
    #[must_use]
    pub fn omitted_line_count(&self) -> usize {
        self.rows()
            .map(|row| match row {
                RenderRow::Omitted(run) => run.count,
                _ => 0,
            })
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Encodes collected entries into cells with the configured width and tabs.
struct CellEncoder<'a> {
    encoder: &'a dyn LineEncoder,
    max_width: usize,
    tab_replacement: &'a str,
}

impl CellEncoder<'_> {
    fn markup(&self, text: &str) -> String {
        self.encoder.encode(text, self.max_width, self.tab_replacement)
    }

    fn cell(&self, entry: LineEntry) -> LineCell {
        LineCell {
            line_number: entry.line_number,
            markup: self.markup(&entry.text),
            comments: entry.comments,
        }
    }
}

/// Renders segments against base and diff cursors.
pub struct AlignmentRenderer<'a> {
    comments: &'a CommentIndex,
    encoder: &'a dyn LineEncoder,
    config: &'a RenderConfig,
    options: ViewOptions,
    base_version: FileVersionId,
    diff_version: FileVersionId,
}

impl<'a> AlignmentRenderer<'a> {
    #[must_use]
    pub fn new(
        comments: &'a CommentIndex,
        encoder: &'a dyn LineEncoder,
        config: &'a RenderConfig,
    ) -> Self {
        Self {
            comments,
            encoder,
            config,
            options: ViewOptions::default(),
            base_version: FileVersionId(0),
            diff_version: FileVersionId(0),
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: ViewOptions) -> Self {
        self.options = options;
        self
    }

    /// File versions the comment lookups use for each side.
    #[must_use]
    pub const fn with_versions(mut self, base: FileVersionId, diff: FileVersionId) -> Self {
        self.base_version = base;
        self.diff_version = diff;
        self
    }

    /// Render a two-revision comparison in the layout the options select.
    pub fn render<B: LineSource, D: LineSource>(
        &self,
        segments: &[Segment],
        base: &mut LineCursor<B>,
        diff: &mut LineCursor<D>,
    ) -> RowPlan {
        let layout = if self.options.unified_view {
            Layout::Unified
        } else {
            Layout::Split {
                base_on_left: self.options.base_on_left,
            }
        };
        self.render_segments(segments, base, Some(diff), layout)
    }

    /// Render one revision on its own, in one column.
    pub fn render_single<B: LineSource>(
        &self,
        segments: &[Segment],
        base: &mut LineCursor<B>,
    ) -> RowPlan {
        self.render_segments::<B, B>(segments, base, None, Layout::SingleRevision)
    }

    fn render_segments<B: LineSource, D: LineSource>(
        &self,
        segments: &[Segment],
        base: &mut LineCursor<B>,
        mut diff: Option<&mut LineCursor<D>>,
        layout: Layout,
    ) -> RowPlan {
        let cells = CellEncoder {
            encoder: self.encoder,
            max_width: self.config.max_line_width,
            tab_replacement: &self.config.tab_replacement,
        };

        // First base line past the end of the file
        let file_end = segments.iter().map(Segment::base_end).max().unwrap_or(1);

        let mut groups = Vec::with_capacity(segments.len());
        for segment in segments {
            let base_entries =
                collect_entries(base, segment.base_line_count, self.comments, self.base_version);
            let diff_entries = diff.as_deref_mut().map_or_else(Vec::new, |cursor| {
                collect_entries(cursor, segment.diff_line_count, self.comments, self.diff_version)
            });
            let paired = pair_entries(base_entries, diff_entries);

            let policy = ElisionPolicy {
                window: self.config.context_window,
                threshold: self.config.elision_threshold,
                file_initial: segment.base_start == 1,
                file_final: segment.base_end() >= file_end,
            };
            let elidable =
                segment.kind == SegmentKind::Unchanged && self.options.omit_unchanged_lines;
            let items = if elidable {
                elide(paired, &policy)
            } else {
                paired.into_iter().map(context::PlanItem::Line).collect()
            };

            let rows = match layout {
                Layout::Split { base_on_left } => {
                    side_by_side::split_rows(items, base_on_left, &cells)
                }
                Layout::Unified | Layout::SingleRevision => {
                    unified::unified_rows(segment.kind, items, &cells)
                }
            };
            groups.push(RowGroup {
                kind: segment.kind,
                rows,
            });
        }

        let plan = RowPlan { layout, groups };
        debug!(
            segments = segments.len(),
            rows = plan.rows().count(),
            omitted = plan.omitted_line_count(),
            "rendered row plan"
        );
        plan
    }
}
