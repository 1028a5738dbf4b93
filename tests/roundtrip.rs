//! Property tests: hunks from a real diff of A -> B reproduce B.

use proptest::prelude::*;
use similar::{Algorithm, DiffOp, capture_diff_slices};

use critview::diff::{SegmentKind, apply_hunks, classify};
use critview::{AlignmentRenderer, CommentIndex, PlainEncoder, RenderConfig, render_texts};

fn range(start: usize, len: usize) -> String {
    if len == 1 {
        format!("{}", start + 1)
    } else {
        format!("{},{}", start + 1, start + len)
    }
}

/// Write `old -> new` as normal-format diff output.
fn normal_diff(old: &[String], new: &[String]) -> String {
    let mut out = String::new();
    for op in capture_diff_slices(Algorithm::Myers, old, new) {
        match op {
            DiffOp::Equal { .. } => {}
            DiffOp::Delete {
                old_index,
                old_len,
                new_index,
            } => {
                out.push_str(&format!("{}d{new_index}\n", range(old_index, old_len)));
                for line in &old[old_index..old_index + old_len] {
                    out.push_str(&format!("< {line}\n"));
                }
            }
            DiffOp::Insert {
                old_index,
                new_index,
                new_len,
            } => {
                out.push_str(&format!("{old_index}a{}\n", range(new_index, new_len)));
                for line in &new[new_index..new_index + new_len] {
                    out.push_str(&format!("> {line}\n"));
                }
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                out.push_str(&format!(
                    "{}c{}\n",
                    range(old_index, old_len),
                    range(new_index, new_len)
                ));
                for line in &old[old_index..old_index + old_len] {
                    out.push_str(&format!("< {line}\n"));
                }
                out.push_str("---\n");
                for line in &new[new_index..new_index + new_len] {
                    out.push_str(&format!("> {line}\n"));
                }
            }
        }
    }
    out
}

fn join(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

fn lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-c]{0,3}", 0..24)
}

proptest! {
    #[test]
    fn prop_hunks_reproduce_target(old in lines(), new in lines()) {
        let hunks = normal_diff(&old, &new);
        prop_assert_eq!(apply_hunks(&join(&old), &hunks), new);
    }

    #[test]
    fn prop_segments_tile_base(old in lines(), new in lines()) {
        let hunks = normal_diff(&old, &new);
        let segments = classify(&hunks, old.len());

        let mut next = 1;
        let mut diff_total = 0;
        for segment in &segments {
            prop_assert_eq!(segment.base_start, next);
            prop_assert!(segment.row_count() > 0);
            match segment.kind {
                SegmentKind::Added => prop_assert_eq!(segment.base_line_count, 0),
                SegmentKind::Deleted => prop_assert_eq!(segment.diff_line_count, 0),
                SegmentKind::Unchanged => {
                    prop_assert_eq!(segment.base_line_count, segment.diff_line_count);
                }
                SegmentKind::Changed => {}
            }
            next += segment.base_line_count;
            diff_total += segment.diff_line_count;
        }
        prop_assert_eq!(next, old.len() + 1);
        prop_assert_eq!(diff_total, new.len());
    }

    #[test]
    fn prop_streamed_diff_side_matches_explicit_text(old in lines(), new in lines()) {
        let hunks = normal_diff(&old, &new);
        let comments = CommentIndex::new();
        let config = RenderConfig::default();
        let encoder = PlainEncoder::text();
        let renderer = AlignmentRenderer::new(&comments, &encoder, &config);

        let base = join(&old);
        let streamed = render_texts(&renderer, &base, None, &hunks);
        let explicit = render_texts(&renderer, &base, Some(&join(&new)), &hunks);
        prop_assert_eq!(streamed, explicit);
    }

    #[test]
    fn prop_no_hunks_is_identity(old in lines()) {
        prop_assert_eq!(apply_hunks(&join(&old), ""), old);
    }
}
