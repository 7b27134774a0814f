use clinvar_csv::{ClinicalLabel, Significance, normalize, tsv};
use proptest::prelude::*;

const TERMS: [&str; 8] = [
    "Pathogenic",
    "Likely pathogenic",
    "Benign",
    "Likely_benign",
    "Uncertain significance",
    "risk factor",
    "drug response",
    "not provided",
];

fn expected_label(term: &str) -> Option<ClinicalLabel> {
    match term.to_lowercase().replace(' ', "_").as_str() {
        "pathogenic" | "likely_pathogenic" => Some(ClinicalLabel::Pathogenic),
        "benign" | "likely_benign" => Some(ClinicalLabel::Benign),
        _ => None,
    }
}

proptest! {
    #[test]
    fn normalize_handles_arbitrary_input(raw in ".*") {
        if let Some(significance) = normalize(Some(raw.as_str()), true) {
            prop_assert!(!significance.is_likely());
        }
    }

    #[test]
    fn first_recognized_term_wins(
        terms in proptest::collection::vec(prop::sample::select(TERMS.to_vec()), 1..6),
        delimiter in prop::sample::select(vec!["|", "/", ",", ";", " | "]),
    ) {
        let raw = terms.join(delimiter);
        let expected = terms.iter().find_map(|term| expected_label(term));
        prop_assert_eq!(normalize(Some(raw.as_str()), true).map(Significance::label), expected);
    }

    #[test]
    fn collapse_flag_only_changes_qualifier(raw in "[A-Za-z_ |/,;]{0,40}") {
        let collapsed = normalize(Some(raw.as_str()), true).map(Significance::label);
        let uncollapsed = normalize(Some(raw.as_str()), false).map(Significance::label);
        prop_assert_eq!(collapsed, uncollapsed);
    }

    #[test]
    fn tsv_reader_handles_arbitrary_input(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
        if let Ok(converted) = tsv::convert_reader(&data[..], None) {
            prop_assert_eq!(converted.rows.len() as u64, converted.summary.emitted_rows);
        }
    }
}
