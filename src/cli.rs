use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use crate::{
    ConversionConfig, ConversionSummary, convert_file, conversion::max_records_from_env,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Convert ClinVar TSV/VCF into CSV for ML pipeline", long_about = None)]
struct Cli {
    /// Path to ClinVar TSV or VCF
    #[arg(long, value_name = "INPUT")]
    input: PathBuf,

    /// Output CSV path
    #[arg(long, value_name = "OUTPUT")]
    output: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = ConversionConfig {
        input: cli.input,
        output: cli.output,
        max_records: max_records_from_env(),
    };

    let summary = convert_file(&config).with_context(|| {
        format!(
            "failed to convert {} into {}",
            config.input.display(),
            config.output.display()
        )
    })?;

    println!("Wrote CSV: {}", config.output.display());
    print_summary(&summary);

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn print_summary(summary: &ConversionSummary) {
    for line in summary_lines(summary) {
        println!("{line}");
    }
}

fn summary_lines(summary: &ConversionSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "Processed {total} records; emitted {emitted} rows ({significance} skipped by significance, {positions} invalid positions).",
        total = summary.total_records,
        emitted = summary.emitted_rows,
        significance = summary.skipped_significance,
        positions = summary.invalid_positions,
    )];

    if summary.records_without_alts > 0 {
        lines.push(format!(
            "Skipped {count} qualifying records with no alternate allele.",
            count = summary.records_without_alts
        ));
    }

    if summary.parse_errors > 0 {
        lines.push(format!(
            "Ignored {count} malformed input records.",
            count = summary.parse_errors
        ));
    }

    lines
}
