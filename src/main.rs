//! critview - render a file comparison as a review row plan
//!
//! Usage: critview [options] <base-file> [<hunk-file>]
//!
//! Without a hunk file the base file is rendered on its own.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use critview::config::{load_render_config, load_render_config_from};
use critview::report::format_plan;
use critview::{
    CommentIndex, ComparisonRequest, FileVersionId, LineEncoder, MemoryRevisionStore, PlainEncoder,
    RenderConfig, SyntaxEncoder, ViewOptions, render_comparison,
};

const BASE_VERSION: FileVersionId = FileVersionId(1);
const DIFF_VERSION: FileVersionId = FileVersionId(2);

fn main() -> Result<()> {
    init_logging();
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => load_render_config_from(path)?,
        None => load_render_config()?.unwrap_or_default(),
    };

    let base_text = read_file(&args.base_path)?;
    let hunk_text = args.hunk_path.as_deref().map(read_file).transpose()?;

    let mut store = MemoryRevisionStore::new();
    store.insert_full(BASE_VERSION, base_text);
    if let Some(path) = &args.diff_path {
        store.insert_full(DIFF_VERSION, read_file(path)?);
    }

    let comments = match &args.comments_path {
        Some(path) => CommentIndex::from_json(&read_file(path)?)
            .with_context(|| format!("Failed to parse comments: {}", path.display()))?,
        None => CommentIndex::new(),
    };

    let encoder = build_encoder(&args, &config);
    let request = ComparisonRequest {
        base_revision: BASE_VERSION,
        diff_revision: if hunk_text.is_some() {
            DIFF_VERSION
        } else {
            BASE_VERSION
        },
        hunks: hunk_text.as_deref().unwrap_or(""),
        options: args.options,
    };
    let plan = render_comparison(&store, &request, &comments, encoder.as_ref(), &config)
        .context("Failed to render comparison")?;

    if args.json {
        let json = serde_json::to_string_pretty(&plan).context("Failed to serialize row plan")?;
        println!("{json}");
    } else {
        print!("{}", format_plan(&plan));
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("CRITVIEW_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn build_encoder(args: &CliArgs, config: &RenderConfig) -> Box<dyn LineEncoder> {
    if args.syntax {
        let path = args.base_path.to_string_lossy().into_owned();
        return match &config.syntax_theme {
            Some(theme) => Box::new(SyntaxEncoder::with_theme(path, theme)),
            None => Box::new(SyntaxEncoder::new(path)),
        };
    }
    // JSON output is meant for HTML consumers
    if args.json {
        Box::new(PlainEncoder::html())
    } else {
        Box::new(PlainEncoder::text())
    }
}

struct CliArgs {
    base_path: PathBuf,
    hunk_path: Option<PathBuf>,
    diff_path: Option<PathBuf>,
    comments_path: Option<PathBuf>,
    config: Option<PathBuf>,
    options: ViewOptions,
    json: bool,
    syntax: bool,
}

fn parse_args() -> Result<CliArgs> {
    let args: Vec<String> = std::env::args().collect();
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut diff_path = None;
    let mut comments_path = None;
    let mut config = None;
    let mut options = ViewOptions::default();
    let mut json = false;
    let mut syntax = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!("Usage: critview [options] <base-file> [<hunk-file>]");
                println!();
                println!("Options:");
                println!("  --diff <file>       Revised file (default: base with hunks applied)");
                println!("  --comments <file>   JSON array of review comments");
                println!("  --unified           One column instead of side by side");
                println!("  --base-right        Put the base revision in the right column");
                println!("  --all-lines         Do not omit long unchanged runs");
                println!("  --json              Print the row plan as JSON");
                println!("  --syntax            Syntax-highlight lines (HTML markup)");
                println!("  --config <file>     Render config JSON");
                println!();
                println!("Environment:");
                println!("  CRITVIEW_LOG        Log filter (default: warn)");
                std::process::exit(0);
            }
            flag @ ("--diff" | "--comments" | "--config") => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("{flag} requires a path");
                }
                let path = Some(PathBuf::from(&args[i]));
                match flag {
                    "--diff" => diff_path = path,
                    "--comments" => comments_path = path,
                    _ => config = path,
                }
            }
            "--unified" => options.unified_view = true,
            "--base-right" => options.base_on_left = false,
            "--all-lines" => options.omit_unchanged_lines = false,
            "--json" => json = true,
            "--syntax" => syntax = true,
            arg if arg.starts_with('-') => {
                anyhow::bail!("Unknown option: {arg}");
            }
            arg => {
                if positional.len() == 2 {
                    anyhow::bail!("Unexpected argument: {arg}");
                }
                positional.push(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    let mut positional = positional.into_iter();
    let Some(base_path) = positional.next() else {
        anyhow::bail!("Missing base file (see --help)");
    };
    let hunk_path = positional.next();
    if diff_path.is_some() && hunk_path.is_none() {
        anyhow::bail!("--diff requires a hunk file");
    }

    Ok(CliArgs {
        base_path,
        hunk_path,
        diff_path,
        comments_path,
        config,
        options,
        json,
        syntax,
    })
}
