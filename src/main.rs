//! normterms: convert a normative service-life workbook into nested JSON.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use normterms::config::Config;
use normterms::document::{parse_workbook, Layout};
use std::fs;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "normterms")]
#[command(about = "Convert a normative service-life sheet to JSON", long_about = None)]
struct Args {
    /// Workbook to read
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// JSON file to write
    #[arg(long, short = 'o', value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Worksheet holding the regulation table
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,

    /// Rows above the first content row
    #[arg(long, value_name = "N")]
    header_rows: Option<u32>,

    /// Text marking the footnote section
    #[arg(long, value_name = "TEXT")]
    marker: Option<String>,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), normterms::Error> {
    let args = Args::parse();
    let mut cfg = Config::load();

    // Override config with command line args
    if let Some(sheet) = args.sheet {
        cfg.sheet_name = sheet;
    }
    if let Some(rows) = args.header_rows {
        cfg.header_rows = rows;
    }
    if let Some(marker) = args.marker {
        cfg.notes_marker = marker;
    }
    let input = args.input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = args.output.unwrap_or_else(|| PathBuf::from(&cfg.output));

    init_tracing(&cfg.log_level);

    let parsed = parse_workbook(&input, &cfg.sheet_name, &Layout::from(&cfg))?;
    if parsed.marker_row.is_none() {
        warn!(marker = %cfg.notes_marker, "no footnote section found");
    }

    fs::write(&output, parsed.document.to_json_string()?)?;
    println!(
        "Converted {} to {} ({} nodes, {} notes)",
        input.display(),
        output.display(),
        parsed.report.nodes,
        parsed.document.notes.len()
    );

    Ok(())
}
