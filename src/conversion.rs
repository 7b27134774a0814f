use std::{io, path::PathBuf};

use thiserror::Error;

use crate::{input::InputFormat, output, tsv, vcf};

/// Environment variable capping how many input records are read.
pub const MAX_RECORDS_ENV: &str = "CLINVAR_CSV_MAX_RECORDS";

/// Get optional max records limit from environment variable.
/// Set `CLINVAR_CSV_MAX_RECORDS=N` to sample only the first N input records.
pub fn max_records_from_env() -> Option<usize> {
    std::env::var(MAX_RECORDS_ENV)
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

/// Configuration required to drive a conversion.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub max_records: Option<usize>,
}

impl ConversionConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            max_records: None,
        }
    }
}

/// Counters collected during one conversion pass.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ConversionSummary {
    /// Input rows or VCF records read.
    pub total_records: u64,
    /// Output rows written (one per alternate allele).
    pub emitted_rows: u64,
    /// Records whose significance was not Pathogenic or Benign.
    pub skipped_significance: u64,
    /// Table rows whose position was not an unsigned integer.
    pub invalid_positions: u64,
    /// VCF records that qualified but listed no alternate allele.
    pub records_without_alts: u64,
    /// Input lines that could not be decoded at all.
    pub parse_errors: u64,
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("unsupported input type for {}: expected .tsv/.txt (table) or .vcf/.vcf.gz (call file)", path.display())]
    UnsupportedInputType { path: PathBuf },
    #[error("missing required columns in TSV: {}", missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read table {}: {source}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("invalid VCF header in {}: {source}", path.display())]
    VcfHeader {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Convert a ClinVar TSV or VCF into the compact CSV.
///
/// The converter is chosen from the input file name. Rows are accumulated
/// in memory and written once, so a failing conversion leaves no output.
pub fn convert_file(config: &ConversionConfig) -> Result<ConversionSummary, ConversionError> {
    let format = InputFormat::detect(&config.input)?;

    tracing::info!(
        input_format = ?format,
        input = %config.input.display(),
        output = %config.output.display(),
        max_records = ?config.max_records,
        "starting conversion",
    );

    let converted = match format {
        InputFormat::Table => tsv::convert(&config.input, config.max_records)?,
        InputFormat::CallFile => vcf::convert(&config.input, config.max_records)?,
    };

    output::write_rows(&config.output, &converted.rows)?;

    let summary = converted.summary;
    tracing::info!(
        total = summary.total_records,
        emitted = summary.emitted_rows,
        skipped_significance = summary.skipped_significance,
        invalid_positions = summary.invalid_positions,
        records_without_alts = summary.records_without_alts,
        parse_errors = summary.parse_errors,
        "conversion complete",
    );
    Ok(summary)
}

/// Rows produced by one converter plus its counters.
#[derive(Debug, Default)]
pub struct Converted {
    pub rows: Vec<output::OutputRow>,
    pub summary: ConversionSummary,
}

impl Converted {
    pub(crate) fn push(&mut self, row: output::OutputRow) {
        self.summary.emitted_rows += 1;
        self.rows.push(row);
    }
}

/// True once `limit` records have been read.
pub(crate) fn limit_reached(limit: Option<usize>, read: u64) -> bool {
    match limit {
        Some(limit) if read >= limit as u64 => {
            tracing::info!(limit, "reached max_records limit, stopping read");
            true
        }
        _ => false,
    }
}
