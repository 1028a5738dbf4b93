//! Context windows around comments and file boundaries, and the omitted-run
//! markers standing in for everything outside them.

use super::align::PairedLine;
use super::OmittedRun;

/// Row range kept visible, inclusive on both ends (0-based within a segment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RowRange {
    pub start: usize,
    pub end: usize,
}

/// Elision parameters for one unchanged segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ElisionPolicy {
    pub window: usize,
    pub threshold: usize,
    /// The segment starts at the top of the file.
    pub file_initial: bool,
    /// The segment ends at the bottom of the file.
    pub file_final: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum PlanItem {
    Line(PairedLine),
    Omitted(OmittedRun),
}

/// Calculate kept row ranges around anchors, merging overlapping ranges.
pub(super) fn visible_ranges(
    commented_rows: &[usize],
    row_count: usize,
    policy: &ElisionPolicy,
) -> Vec<RowRange> {
    if row_count == 0 {
        return Vec::new();
    }
    let last = row_count - 1;
    let window = policy.window;

    let mut ranges: Vec<RowRange> = commented_rows
        .iter()
        .filter(|&&row| row <= last)
        .map(|&row| RowRange {
            start: row.saturating_sub(window),
            end: row.saturating_add(window).min(last),
        })
        .collect();
    if policy.file_initial && window > 0 {
        ranges.push(RowRange {
            start: 0,
            end: (window - 1).min(last),
        });
    }
    if policy.file_final && window > 0 {
        ranges.push(RowRange {
            start: row_count.saturating_sub(window),
            end: last,
        });
    }

    ranges.sort_by_key(|r| r.start);

    let mut merged: Vec<RowRange> = Vec::new();
    for range in ranges {
        if let Some(prev) = merged.last_mut() {
            if range.start <= prev.end + 1 {
                prev.end = prev.end.max(range.end);
                continue;
            }
        }
        merged.push(range);
    }
    merged
}

/// Collapse rows outside the visible ranges into omitted-run markers.
///
/// Segments at or below the threshold come back unchanged.
pub(super) fn elide(rows: Vec<PairedLine>, policy: &ElisionPolicy) -> Vec<PlanItem> {
    if rows.len() <= policy.threshold {
        return rows.into_iter().map(PlanItem::Line).collect();
    }

    let commented: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.has_comments())
        .map(|(idx, _)| idx)
        .collect();
    let ranges = visible_ranges(&commented, rows.len(), policy);

    let mut items = Vec::new();
    let mut ranges = ranges.iter().peekable();
    let mut pending: Option<OmittedRun> = None;

    for (idx, row) in rows.into_iter().enumerate() {
        while ranges.next_if(|r| r.end < idx).is_some() {}
        let visible = ranges.peek().is_some_and(|r| r.start <= idx);

        if visible {
            if let Some(run) = pending.take() {
                items.push(PlanItem::Omitted(run));
            }
            items.push(PlanItem::Line(row));
        } else if let Some(run) = pending.as_mut() {
            run.count += 1;
        } else {
            pending = Some(OmittedRun {
                base_start: row.base.as_ref().map_or(0, |e| e.line_number),
                diff_start: row.diff.as_ref().map(|e| e.line_number),
                count: 1,
            });
        }
    }
    if let Some(run) = pending {
        items.push(PlanItem::Omitted(run));
    }
    items
}
