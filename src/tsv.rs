//! ClinVar tab-delimited summary tables.
//!
//! Column names drift between ClinVar releases and mirrors
//! (`Chromosome` vs `chrom`, `Start` vs `pos`, ...). Each logical field is
//! resolved against a fixed, ordered alias list before any row is read.

use std::io::BufRead;
use std::path::Path;

use csv::StringRecord;

use crate::conversion::{ConversionError, Converted, limit_reached};
use crate::output::OutputRow;
use crate::significance::{classify, is_missing_value};
use crate::smart_reader::open_input;

/// A logical column of the summary table.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Field {
    Chrom,
    Pos,
    Ref,
    Alt,
    Gene,
    Significance,
    HgvsP,
}

impl Field {
    /// Fields whose absence aborts the conversion.
    pub const REQUIRED: [Field; 6] = [
        Field::Chrom,
        Field::Pos,
        Field::Ref,
        Field::Alt,
        Field::Gene,
        Field::Significance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Chrom => "chrom",
            Field::Pos => "pos",
            Field::Ref => "ref",
            Field::Alt => "alt",
            Field::Gene => "gene",
            Field::Significance => "sig",
            Field::HgvsP => "hgvs_p",
        }
    }

    /// Header names accepted for this field, highest priority first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Chrom => &["chromosome", "chrom", "chr"],
            Field::Pos => &["start", "pos", "position"],
            Field::Ref => &["referenceallele", "ref"],
            Field::Alt => &["alternateallele", "alt", "altallele"],
            Field::Gene => &["genesymbol", "gene_symbol", "gene", "symbol"],
            Field::Significance => &["clinicalsignificance", "clinsig", "clinical_significance"],
            Field::HgvsP => &["hgvsp", "hgvs_p", "protein_change", "protein_hgvs"],
        }
    }

    /// Index of the first alias present in `headers`, compared case-insensitively.
    pub fn resolve(self, headers: &StringRecord) -> Option<usize> {
        self.aliases().iter().find_map(|alias| {
            // Duplicate spellings of the same header: the last one wins.
            (0..headers.len())
                .rev()
                .find(|&index| headers[index].to_lowercase() == *alias)
        })
    }
}

/// Header positions of every logical field.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ColumnMap {
    pub chrom: usize,
    pub pos: usize,
    pub reference: usize,
    pub alt: usize,
    pub gene: usize,
    pub significance: usize,
    pub hgvs_p: Option<usize>,
}

impl ColumnMap {
    pub fn resolve(headers: &StringRecord) -> Result<Self, ConversionError> {
        let resolved = Field::REQUIRED.map(|field| field.resolve(headers));

        let columns = match resolved {
            [
                Some(chrom),
                Some(pos),
                Some(reference),
                Some(alt),
                Some(gene),
                Some(significance),
            ] => Self {
                chrom,
                pos,
                reference,
                alt,
                gene,
                significance,
                hgvs_p: Field::HgvsP.resolve(headers),
            },
            _ => {
                let missing = Field::REQUIRED
                    .iter()
                    .zip(resolved)
                    .filter(|(_, index)| index.is_none())
                    .map(|(field, _)| field.name())
                    .collect();
                return Err(ConversionError::MissingColumns { missing });
            }
        };

        tracing::debug!(?columns, "resolved TSV columns");
        Ok(columns)
    }
}

/// Convert a (possibly gzipped) ClinVar summary table.
pub fn convert(path: &Path, max_records: Option<usize>) -> Result<Converted, ConversionError> {
    let reader = open_input(path).map_err(|source| ConversionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    convert_reader(reader, max_records).map_err(|err| match err {
        ConversionError::Csv(source) => ConversionError::Table {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Convert a summary table from any buffered reader.
pub fn convert_reader<R>(reader: R, max_records: Option<usize>) -> Result<Converted, ConversionError>
where
    R: BufRead,
{
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let columns = ColumnMap::resolve(reader.headers()?)?;
    let mut converted = Converted::default();
    let mut record = StringRecord::new();

    loop {
        if limit_reached(max_records, converted.summary.total_records) {
            break;
        }
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                converted.summary.total_records += 1;
                converted.summary.parse_errors += 1;
                tracing::warn!("failed to read TSV row: {}", e);
                continue;
            }
        }
        converted.summary.total_records += 1;

        let Some(clinical_significance) = classify(record.get(columns.significance)) else {
            converted.summary.skipped_significance += 1;
            continue;
        };

        let Some(pos) = parse_position(cell(&record, columns.pos)) else {
            converted.summary.invalid_positions += 1;
            tracing::debug!(
                position = cell(&record, columns.pos),
                "dropping row with non-numeric position"
            );
            continue;
        };

        converted.push(OutputRow {
            chrom: text(&record, columns.chrom),
            pos,
            reference: text(&record, columns.reference),
            alt: text(&record, columns.alt),
            gene_symbol: text(&record, columns.gene),
            clinical_significance,
            hgvs_p: columns
                .hgvs_p
                .map(|index| text(&record, index))
                .unwrap_or_default(),
        });
    }

    Ok(converted)
}

/// Parse a position cell; anything but an unsigned integer is rejected.
pub fn parse_position(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

// Short rows read as if their trailing cells were empty.
fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn text(record: &StringRecord, index: usize) -> String {
    let value = cell(record, index);
    if is_missing_value(value) {
        String::new()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::significance::ClinicalLabel;

    fn run(data: &str) -> Converted {
        convert_reader(data.as_bytes(), None).expect("convert")
    }

    #[test]
    fn resolves_aliases_case_insensitively() {
        let headers = StringRecord::from(vec![
            "#AlleleID",
            "GeneSymbol",
            "ClinicalSignificance",
            "Chromosome",
            "Start",
            "ReferenceAllele",
            "AlternateAllele",
        ]);
        let columns = ColumnMap::resolve(&headers).unwrap();
        assert_eq!(columns.chrom, 3);
        assert_eq!(columns.pos, 4);
        assert_eq!(columns.reference, 5);
        assert_eq!(columns.alt, 6);
        assert_eq!(columns.gene, 1);
        assert_eq!(columns.significance, 2);
        assert_eq!(columns.hgvs_p, None);
    }

    #[test]
    fn alias_priority_beats_column_order() {
        let headers = StringRecord::from(vec!["pos", "Start", "chr", "Chromosome"]);
        assert_eq!(Field::Pos.resolve(&headers), Some(1));
        assert_eq!(Field::Chrom.resolve(&headers), Some(3));
    }

    #[test]
    fn duplicate_headers_resolve_to_last() {
        let headers = StringRecord::from(vec!["chrom", "CHROM", "pos"]);
        assert_eq!(Field::Chrom.resolve(&headers), Some(1));
        assert_eq!(Field::Pos.resolve(&headers), Some(2));
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let headers = StringRecord::from(vec!["chrom", "pos", "alt", "clinsig"]);
        match ColumnMap::resolve(&headers) {
            Err(ConversionError::MissingColumns { missing }) => {
                assert_eq!(missing, vec!["ref", "gene"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn converts_summary_row() {
        let converted = run(
            "Chromosome\tStart\tReferenceAllele\tAlternateAllele\tGeneSymbol\tClinicalSignificance\tHGVSp\n\
             1\t12345\tA\tG\tBRCA1\tPathogenic\tp.Val600Glu\n",
        );
        assert_eq!(
            converted.rows,
            vec![OutputRow {
                chrom: "1".into(),
                pos: 12345,
                reference: "A".into(),
                alt: "G".into(),
                gene_symbol: "BRCA1".into(),
                clinical_significance: ClinicalLabel::Pathogenic,
                hgvs_p: "p.Val600Glu".into(),
            }]
        );
        assert_eq!(converted.summary.emitted_rows, 1);
    }

    #[test]
    fn filters_and_relabels_in_input_order() {
        let converted = run(
            "chrom\tpos\tref\talt\tgene\tclinsig\n\
             1\t10\tA\tG\tG1\tLikely pathogenic\n\
             1\t20\tC\tT\tG2\tUncertain significance\n\
             2\t30\tG\tA\tG3\tBenign/Likely benign\n\
             2\t40\tT\tC\tG4\t\n",
        );
        let positions: Vec<u64> = converted.rows.iter().map(|row| row.pos).collect();
        assert_eq!(positions, vec![10, 30]);
        assert_eq!(converted.rows[0].clinical_significance, ClinicalLabel::Pathogenic);
        assert_eq!(converted.rows[1].clinical_significance, ClinicalLabel::Benign);
        assert!(converted.rows.iter().all(|row| row.hgvs_p.is_empty()));
        assert_eq!(converted.summary.total_records, 4);
        assert_eq!(converted.summary.skipped_significance, 2);
    }

    #[test]
    fn unparseable_positions_are_dropped() {
        let converted = run(
            "chrom\tpos\tref\talt\tgene\tclinsig\n\
             1\tna\tA\tG\tG1\tPathogenic\n\
             1\t-1\tA\tG\tG1\tPathogenic\n\
             1\t 77 \tA\tG\tG1\tPathogenic\n",
        );
        assert_eq!(converted.rows.len(), 1);
        assert_eq!(converted.rows[0].pos, 77);
        assert_eq!(converted.summary.invalid_positions, 2);
    }

    #[test]
    fn short_rows_have_empty_trailing_cells() {
        let converted = run(
            "chrom\tpos\tref\talt\tclinsig\tgene\tprotein_change\n\
             X\t5\tA\tG\tBenign\n",
        );
        assert_eq!(converted.rows.len(), 1);
        assert_eq!(converted.rows[0].gene_symbol, "");
        assert_eq!(converted.rows[0].hgvs_p, "");
    }

    #[test]
    fn missing_hgvs_cells_become_empty() {
        let converted = run(
            "chrom\tpos\tref\talt\tgene\tclinsig\thgvs_p\n\
             1\t5\tA\tG\tG1\tBenign\tNA\n",
        );
        assert_eq!(converted.rows[0].hgvs_p, "");
    }

    #[test]
    fn max_records_limits_rows_read() {
        let data = "chrom\tpos\tref\talt\tgene\tclinsig\n\
                    1\t1\tA\tG\tG1\tBenign\n\
                    1\t2\tA\tG\tG1\tBenign\n\
                    1\t3\tA\tG\tG1\tBenign\n";
        let converted = convert_reader(data.as_bytes(), Some(2)).unwrap();
        assert_eq!(converted.rows.len(), 2);
        assert_eq!(converted.summary.total_records, 2);
    }

    #[test]
    fn empty_input_reports_missing_columns() {
        assert!(matches!(
            convert_reader("".as_bytes(), None),
            Err(ConversionError::MissingColumns { .. })
        ));
    }

    #[test]
    fn parse_position_rejects_non_integers() {
        assert_eq!(parse_position("41196312"), Some(41196312));
        assert_eq!(parse_position("1.5"), None);
        assert_eq!(parse_position(""), None);
    }
}
