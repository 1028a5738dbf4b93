//! Typed segments over the base file
//!
//! Classification runs in two phases: every hunk is parsed first (hunk lists
//! are small and bounded), then segment extents are resolved against the base
//! file's known line count, so the trailing unchanged run has a real length.

use serde::Serialize;

use super::parse::{Hunk, HunkTokenizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Unchanged,
    Added,
    Deleted,
    Changed,
}

/// A contiguous run of lines with one change type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    /// First base line covered (for `Added`, the base line the insert precedes)
    pub base_start: usize,
    pub base_line_count: usize,
    pub diff_line_count: usize,
}

impl Segment {
    #[must_use]
    pub const fn unchanged(base_start: usize, count: usize) -> Self {
        Self {
            kind: SegmentKind::Unchanged,
            base_start,
            base_line_count: count,
            diff_line_count: count,
        }
    }

    fn from_hunk(hunk: &Hunk) -> Option<Self> {
        let kind = match (hunk.base_count(), hunk.diff_count()) {
            (0, 0) => return None,
            (_, 0) => SegmentKind::Deleted,
            (0, _) => SegmentKind::Added,
            _ => SegmentKind::Changed,
        };
        Some(Self {
            kind,
            base_start: hunk.effect_line(),
            base_line_count: hunk.base_count(),
            diff_line_count: hunk.diff_count(),
        })
    }

    /// Rows the segment occupies once both sides are paired.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        if self.base_line_count > self.diff_line_count {
            self.base_line_count
        } else {
            self.diff_line_count
        }
    }

    /// First base line after the segment.
    #[must_use]
    pub const fn base_end(&self) -> usize {
        self.base_start.saturating_add(self.base_line_count)
    }
}

/// Parsed hunks of one comparison, ready to be resolved into segments.
#[derive(Debug, Clone, Default)]
pub struct SegmentClassifier {
    hunks: Vec<Hunk>,
}

impl SegmentClassifier {
    pub fn new(hunks: impl IntoIterator<Item = Hunk>) -> Self {
        Self {
            hunks: hunks.into_iter().collect(),
        }
    }

    /// Parse raw normal-format hunk text.
    #[must_use]
    pub fn parse(hunk_text: &str) -> Self {
        Self::new(HunkTokenizer::new(hunk_text))
    }

    #[must_use]
    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }

    /// Resolve the segment sequence for a base file of `base_line_total` lines.
    ///
    /// Unchanged segments fill the gaps before, between and after hunks;
    /// zero-length gaps produce nothing. The base counts tile
    /// `1..=base_line_total` for hunks that arrive in order.
    #[must_use]
    pub fn segments(&self, base_line_total: usize) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(self.hunks.len() * 2 + 1);
        let mut next_base = 1;

        for hunk in &self.hunks {
            let Some(segment) = Segment::from_hunk(hunk) else {
                continue;
            };
            if segment.base_start > next_base {
                segments.push(Segment::unchanged(
                    next_base,
                    segment.base_start - next_base,
                ));
            }
            next_base = next_base.max(segment.base_end());
            segments.push(segment);
        }

        if base_line_total >= next_base {
            segments.push(Segment::unchanged(
                next_base,
                base_line_total - next_base + 1,
            ));
        }

        segments
    }
}

/// Classify raw hunk text against a base of `base_line_total` lines.
#[must_use]
pub fn classify(hunk_text: &str, base_line_total: usize) -> Vec<Segment> {
    SegmentClassifier::parse(hunk_text).segments(base_line_total)
}
