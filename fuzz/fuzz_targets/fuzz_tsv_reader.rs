#![no_main]

use clinvar_csv::ClinicalLabel;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes either fail column resolution or convert cleanly
    if let Ok(converted) = clinvar_csv::tsv::convert_reader(data, Some(1000)) {
        assert_eq!(converted.rows.len() as u64, converted.summary.emitted_rows);
        for row in converted.rows {
            assert!(matches!(
                row.clinical_significance,
                ClinicalLabel::Pathogenic | ClinicalLabel::Benign
            ));
            assert_eq!(clinvar_csv::tsv::parse_position(&row.pos.to_string()), Some(row.pos));
        }
    }
});
