//! Unified rows: one column, base pass then diff pass for changed segments.

use crate::diff::SegmentKind;

use super::align::LineEntry;
use super::context::PlanItem;
use super::{CellEncoder, RenderRow};

pub(super) fn unified_rows(
    kind: SegmentKind,
    items: Vec<PlanItem>,
    cells: &CellEncoder<'_>,
) -> Vec<RenderRow> {
    if kind == SegmentKind::Unchanged {
        return items
            .into_iter()
            .filter_map(|item| match item {
                PlanItem::Omitted(run) => Some(RenderRow::Omitted(run)),
                PlanItem::Line(paired) => interleaved_row(paired.base, paired.diff, cells),
            })
            .collect();
    }

    let mut base_pass = Vec::new();
    let mut diff_pass = Vec::new();
    for item in items {
        match item {
            PlanItem::Omitted(run) => base_pass.push(RenderRow::Omitted(run)),
            PlanItem::Line(paired) => {
                if let Some(entry) = paired.base {
                    base_pass.push(one_sided_row(entry, true, cells));
                }
                if let Some(entry) = paired.diff {
                    diff_pass.push(one_sided_row(entry, false, cells));
                }
            }
        }
    }
    base_pass.extend(diff_pass);
    base_pass
}

/// An unchanged line shown once, numbered on both sides.
fn interleaved_row(
    base: Option<LineEntry>,
    diff: Option<LineEntry>,
    cells: &CellEncoder<'_>,
) -> Option<RenderRow> {
    let markup = match (&base, &diff) {
        (Some(entry), _) | (None, Some(entry)) => cells.markup(&entry.text),
        (None, None) => return None,
    };
    let base_line = base.as_ref().map(|e| e.line_number);
    let diff_line = diff.as_ref().map(|e| e.line_number);
    let comments = base
        .into_iter()
        .chain(diff)
        .flat_map(|entry| entry.comments)
        .collect();

    Some(RenderRow::Unified {
        base_line,
        diff_line,
        markup,
        comments,
    })
}

fn one_sided_row(entry: LineEntry, is_base: bool, cells: &CellEncoder<'_>) -> RenderRow {
    let markup = cells.markup(&entry.text);
    let (base_line, diff_line) = if is_base {
        (Some(entry.line_number), None)
    } else {
        (None, Some(entry.line_number))
    };
    RenderRow::Unified {
        base_line,
        diff_line,
        markup,
        comments: entry.comments,
    }
}
