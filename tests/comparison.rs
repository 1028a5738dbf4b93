//! End-to-end comparisons through the revision store.

use critview::diff::{Segment, SegmentKind, classify};
use critview::report::format_plan;
use critview::{
    Comment, CommentIndex, ComparisonRequest, FileVersionId, Layout, MemoryRevisionStore,
    OmittedRun, PlainEncoder, RenderConfig, RenderRow, RevisionError, ViewOptions,
    render_comparison,
};

const V1: FileVersionId = FileVersionId(1);
const V2: FileVersionId = FileVersionId(2);
const V3: FileVersionId = FileVersionId(3);

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_test_writer()
        .try_init();
}

fn numbered_text(lines: usize) -> String {
    (1..=lines).map(|n| format!("line {n}\n")).collect()
}

fn comment(version: FileVersionId, line: usize, body: &str) -> Comment {
    Comment {
        comment_id: format!("{version}-{line}"),
        file_version_id: version,
        line,
        author: "reviewer".to_string(),
        body: body.to_string(),
        created_at: "2026-10-19T09:00:00Z".to_string(),
    }
}

fn compare(
    store: &MemoryRevisionStore,
    base: FileVersionId,
    diff: FileVersionId,
    hunks: &str,
    options: ViewOptions,
    comments: &CommentIndex,
) -> Result<critview::RowPlan, RevisionError> {
    let request = ComparisonRequest {
        base_revision: base,
        diff_revision: diff,
        hunks,
        options,
    };
    render_comparison(
        store,
        &request,
        comments,
        &PlainEncoder::text(),
        &RenderConfig::default(),
    )
}

#[test]
fn test_changed_line_example() {
    init_tracing();
    let hunks = "2c2\n< b\n---\n> B\n";

    assert_eq!(classify(hunks, 4), vec![
        Segment::unchanged(1, 1),
        Segment {
            kind: SegmentKind::Changed,
            base_start: 2,
            base_line_count: 1,
            diff_line_count: 1,
        },
        Segment::unchanged(3, 2),
    ]);

    let mut store = MemoryRevisionStore::new();
    store.insert_full(V1, "a\nb\nc\nd\n");
    let plan = compare(&store, V1, V2, hunks, ViewOptions::default(), &CommentIndex::new())
        .expect("base stored");

    assert_eq!(
        format_plan(&plan),
        "    1 a |     1 a\n    2 b |     2 B\n    3 c |     3 c\n    4 d |     4 d\n"
    );
}

#[test]
fn test_elided_comparison_around_comment() {
    init_tracing();
    let mut store = MemoryRevisionStore::new();
    store.insert_full(V1, numbered_text(501));
    let comments = CommentIndex::from_comments([comment(V2, 250, "is this still needed?")]);

    let plan = compare(&store, V1, V2, "501d500\n< line 501\n", ViewOptions::default(), &comments)
        .expect("base stored");
    assert_eq!(plan.groups[1].kind, SegmentKind::Deleted);

    let omitted: Vec<OmittedRun> = plan
        .rows()
        .filter_map(|row| match row {
            RenderRow::Omitted(run) => Some(*run),
            _ => None,
        })
        .collect();
    assert_eq!(omitted, vec![
        OmittedRun {
            base_start: 51,
            diff_start: Some(51),
            count: 149,
        },
        OmittedRun {
            base_start: 301,
            diff_start: Some(301),
            count: 200,
        },
    ]);

    let report = format_plan(&plan);
    assert!(report.contains("··· 149 lines omitted · show entire file ···"));
    assert!(report.contains("# reviewer: is this still needed?"));
}

#[test]
fn test_stacked_revisions_in_unified_view() {
    let mut store = MemoryRevisionStore::new();
    store.insert_full(V1, "fn main() {\n    run();\n}\n");
    store.insert_delta(V2, V1, "2c2\n<     run();\n---\n>     run(args);\n");
    store.insert_delta(V3, V2, "1a2\n>     let args = parse();\n");

    let options = ViewOptions {
        unified_view: true,
        ..ViewOptions::default()
    };
    let hunks = "1a2\n>     let args = parse();\n";
    let plan =
        compare(&store, V2, V3, hunks, options, &CommentIndex::new()).expect("chain resolves");

    assert_eq!(plan.layout, Layout::Unified);
    assert_eq!(
        format_plan(&plan),
        concat!(
            "    1     1   fn main() {\n",
            "          2 +     let args = parse();\n",
            "    2     3       run(args);\n",
            "    3     4   }\n",
        )
    );
}

#[test]
fn test_missing_base_in_chain_is_reported() {
    let mut store = MemoryRevisionStore::new();
    store.insert_delta(V3, V2, "1d0\n< a\n");

    let err = compare(&store, V3, V3, "", ViewOptions::default(), &CommentIndex::new())
        .expect_err("base of v3 is missing");
    assert_eq!(err.to_string(), "base revision 2 not found (needed by revision 3)");
}

#[test]
fn test_rendering_is_idempotent() {
    let mut store = MemoryRevisionStore::new();
    store.insert_full(V1, numbered_text(260));
    let hunks = "130c130\n< line 130\n---\n> line one-thirty\n";
    let comments = CommentIndex::from_comments([comment(V1, 10, "typo")]);

    let first = compare(&store, V1, V2, hunks, ViewOptions::default(), &comments).expect("stored");
    let second = compare(&store, V1, V2, hunks, ViewOptions::default(), &comments).expect("stored");
    assert_eq!(first, second);
    assert_eq!(format_plan(&first), format_plan(&second));
}

#[test]
fn test_plan_serializes_to_json() {
    let mut store = MemoryRevisionStore::new();
    store.insert_full(V1, "a\n<b>\n");
    let plan = compare(&store, V1, V1, "", ViewOptions::default(), &CommentIndex::new())
        .expect("stored");

    let value = serde_json::to_value(&plan).expect("serializable");
    assert_eq!(value["layout"], "single_revision");
    assert_eq!(value["groups"][0]["kind"], "unchanged");
    let row = &value["groups"][0]["rows"][1];
    assert_eq!(row["row"], "unified");
    assert_eq!(row["base_line"], 2);
    assert_eq!(row["markup"], "<b>");
}
