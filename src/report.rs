//! Plain-text rendering of a row plan for terminals and logs.

use std::fmt::Write;

use crate::comments::Comment;
use crate::layout::{REPORT_COMMENT_INDENT, REPORT_LINE_NUM_WIDTH, split_column_width};
use crate::render::{Layout, LineCell, RenderRow, RowPlan};
use crate::text::pad_to_width;

/// Format `plan` as aligned text, one output line per row plus one per
/// comment.
#[must_use]
pub fn format_plan(plan: &RowPlan) -> String {
    let column = split_column_width(widest_left_cell(plan));
    let mut out = String::new();

    for row in plan.rows() {
        match row {
            RenderRow::Omitted(run) => {
                let _ = writeln!(out, "{}", run.label());
            }
            RenderRow::Split { left, right } => {
                let left_text = cell_text(left.as_ref());
                let _ = writeln!(
                    out,
                    "{} {} | {} {}",
                    line_num(left.as_ref().map(|c| c.line_number)),
                    pad_to_width(left_text, column),
                    line_num(right.as_ref().map(|c| c.line_number)),
                    cell_text(right.as_ref()),
                );
                for cell in [left, right].into_iter().flatten() {
                    push_comments(&mut out, &cell.comments);
                }
            }
            RenderRow::Unified {
                base_line,
                diff_line,
                markup,
                comments,
            } => {
                if plan.layout == Layout::SingleRevision {
                    let _ = writeln!(out, "{} {markup}", line_num(*base_line));
                } else {
                    let sign = match (base_line, diff_line) {
                        (Some(_), None) => '-',
                        (None, Some(_)) => '+',
                        _ => ' ',
                    };
                    let _ = writeln!(
                        out,
                        "{} {} {sign} {markup}",
                        line_num(*base_line),
                        line_num(*diff_line),
                    );
                }
                push_comments(&mut out, comments);
            }
        }
    }
    out
}

fn widest_left_cell(plan: &RowPlan) -> usize {
    plan.rows()
        .filter_map(|row| match row {
            RenderRow::Split { left: Some(cell), .. } => Some(cell.markup.chars().count()),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

fn cell_text(cell: Option<&LineCell>) -> &str {
    cell.map_or("", |c| c.markup.as_str())
}

fn line_num(line: Option<usize>) -> String {
    line.map_or_else(
        || " ".repeat(REPORT_LINE_NUM_WIDTH),
        |n| format!("{n:>width$}", width = REPORT_LINE_NUM_WIDTH),
    )
}

fn push_comments(out: &mut String, comments: &[Comment]) {
    let indent = " ".repeat(REPORT_COMMENT_INDENT);
    for comment in comments {
        let _ = writeln!(out, "{indent}# {}: {}", comment.author, comment.body);
    }
}
