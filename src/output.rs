use std::{fs::File, io::BufWriter, path::Path};

use serde::Serialize;

use crate::conversion::ConversionError;
use crate::significance::ClinicalLabel;

/// Column names of the converted CSV, in output order.
pub const OUTPUT_HEADER: [&str; 7] = [
    "chrom",
    "pos",
    "ref",
    "alt",
    "gene_symbol",
    "clinical_significance",
    "hgvs_p",
];

/// One converted (variant, alternate allele) row.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct OutputRow {
    pub chrom: String,
    pub pos: u64,
    #[serde(rename = "ref")]
    pub reference: String,
    pub alt: String,
    pub gene_symbol: String,
    pub clinical_significance: ClinicalLabel,
    pub hgvs_p: String,
}

/// Write rows as CSV. The header is always written, even for an empty set.
pub fn write_rows<P>(path: P, rows: &[OutputRow]) -> Result<(), ConversionError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ConversionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_rows_to(BufWriter::new(file), rows)?;

    tracing::debug!(rows = rows.len(), output = %path.display(), "wrote CSV");
    Ok(())
}

/// Write rows as CSV into an arbitrary sink.
pub fn write_rows_to<W>(sink: W, rows: &[OutputRow]) -> Result<(), ConversionError>
where
    W: std::io::Write,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);
    writer.write_record(OUTPUT_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
