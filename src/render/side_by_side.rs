//! Side-by-side rows (two columns, base on the left by default).

use super::context::PlanItem;
use super::{CellEncoder, RenderRow};

pub(super) fn split_rows(
    items: Vec<PlanItem>,
    base_on_left: bool,
    cells: &CellEncoder<'_>,
) -> Vec<RenderRow> {
    items
        .into_iter()
        .map(|item| match item {
            PlanItem::Omitted(run) => RenderRow::Omitted(run),
            PlanItem::Line(paired) => {
                let base = paired.base.map(|entry| cells.cell(entry));
                let diff = paired.diff.map(|entry| cells.cell(entry));
                let (left, right) = if base_on_left { (base, diff) } else { (diff, base) };
                RenderRow::Split { left, right }
            }
        })
        .collect()
}
