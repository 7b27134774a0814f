#![no_main]

use clinvar_csv::{ClinicalLabel, Significance, normalize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    // Collapsing must never surface a likely qualifier
    if let Some(significance) = normalize(Some(&*input), true) {
        assert!(!significance.is_likely());
    }

    // Both modes agree on the label
    let collapsed = normalize(Some(&*input), true).map(Significance::label);
    let uncollapsed = normalize(Some(&*input), false).map(Significance::label);
    assert_eq!(collapsed, uncollapsed);
    if let Some(label) = collapsed {
        assert!(matches!(label, ClinicalLabel::Pathogenic | ClinicalLabel::Benign));
    }
});
