//! ClinVar VCF releases.
//!
//! Significance, gene and protein change live in INFO fields. Records with
//! several alternate alleles expand to one output row per allele.

use std::io::{self, BufRead};
use std::path::Path;

use noodles::vcf::{
    self,
    variant::record_buf::{
        Info, RecordBuf,
        info::field::{Value, value::Array},
    },
};

use crate::conversion::{ConversionError, Converted, limit_reached};
use crate::output::OutputRow;
use crate::significance::{ClinicalLabel, classify};
use crate::smart_reader::open_input;

pub const CLNSIG: &str = "CLNSIG";
pub const CLNSIGCONF: &str = "CLNSIGCONF";
pub const GENEINFO: &str = "GENEINFO";

/// INFO keys carrying protein-level HGVS, highest priority first.
pub const HGVS_P_KEYS: [&str; 4] = ["HGVSP", "HGVSp", "HGVS_P", "HGVS"];

/// Convert a plain, gzipped or BGZF-compressed ClinVar VCF.
pub fn convert(path: &Path, max_records: Option<usize>) -> Result<Converted, ConversionError> {
    let reader = open_input(path).map_err(|source| ConversionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    convert_reader(reader, max_records).map_err(|err| match err {
        ReadError::Header(source) => ConversionError::VcfHeader {
            path: path.to_path_buf(),
            source,
        },
        ReadError::Io(source) => ConversionError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Failure modes of [`convert_reader`], before a path is attached.
#[derive(Debug)]
pub enum ReadError {
    Header(io::Error),
    Io(io::Error),
}

/// Convert VCF text from any buffered reader.
pub fn convert_reader<R>(reader: R, max_records: Option<usize>) -> Result<Converted, ReadError>
where
    R: BufRead,
{
    let mut reader = vcf::io::Reader::new(reader);
    let header = reader.read_header().map_err(ReadError::Header)?;

    let mut converted = Converted::default();

    for result in reader.record_bufs(&header) {
        if limit_reached(max_records, converted.summary.total_records) {
            break;
        }
        converted.summary.total_records += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                converted.summary.parse_errors += 1;
                tracing::warn!("failed to read VCF record: {}", e);
                continue;
            }
            Err(e) => return Err(ReadError::Io(e)),
        };

        let Some(annotation) = Annotation::from_record(&record) else {
            converted.summary.skipped_significance += 1;
            continue;
        };

        // POS 0 (telomere) has no 1-based start but is still a valid position.
        let pos = record
            .variant_start()
            .map_or(0, |start| usize::from(start) as u64);

        let alts = record.alternate_bases().as_ref();
        if alts.is_empty() {
            converted.summary.records_without_alts += 1;
            continue;
        }

        for alt in alts {
            converted.push(OutputRow {
                chrom: record.reference_sequence_name().to_string(),
                pos,
                reference: record.reference_bases().to_string(),
                alt: alt.to_string(),
                gene_symbol: annotation.gene_symbol.clone(),
                clinical_significance: annotation.significance,
                hgvs_p: annotation.hgvs_p.clone(),
            });
        }
    }

    Ok(converted)
}

/// Per-record fields shared by every alternate allele.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Annotation {
    pub significance: ClinicalLabel,
    pub gene_symbol: String,
    pub hgvs_p: String,
}

impl Annotation {
    /// `None` when the record is neither Pathogenic nor Benign.
    pub fn from_record(record: &RecordBuf) -> Option<Self> {
        let info = record.info();

        let raw_significance = info_text(info, CLNSIG)
            .filter(|value| !value.is_empty())
            .or_else(|| info_text(info, CLNSIGCONF));
        let significance = classify(raw_significance.as_deref())?;

        let gene_symbol = info_text(info, GENEINFO)
            .map(|value| gene_symbol(&value).to_string())
            .unwrap_or_default();

        let hgvs_p = HGVS_P_KEYS
            .iter()
            .filter_map(|key| info_text(info, key))
            .find(|value| !value.is_empty())
            .unwrap_or_default();

        Some(Self {
            significance,
            gene_symbol,
            hgvs_p,
        })
    }
}

/// First symbol of a `SYMBOL1:ID1|SYMBOL2:ID2` gene-info value.
pub fn gene_symbol(gene_info: &str) -> &str {
    let first = gene_info.split('|').next().unwrap_or_default();
    first.split(':').next().unwrap_or_default()
}

/// Render an INFO value as text. Array values are re-joined with commas.
fn info_text(info: &Info, key: &str) -> Option<String> {
    let value = info.get(key)?;
    Some(match value {
        None | Some(Value::Flag) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Integer(n)) => n.to_string(),
        Some(Value::Float(n)) => n.to_string(),
        Some(Value::Character(c)) => c.to_string(),
        Some(Value::Array(array)) => join_array(array),
    })
}

fn join_array(array: &Array) -> String {
    fn join<T: ToString>(values: &[Option<T>]) -> String {
        values
            .iter()
            .flatten()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    match array {
        Array::Integer(values) => join(values),
        Array::Float(values) => join(values),
        Array::Character(values) => join(values),
        Array::String(values) => join(values),
    }
}
