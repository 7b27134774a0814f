//! Clinical significance normalization.
//!
//! ClinVar significance fields are free text and frequently multi-valued,
//! with the separator depending on the release and the file type
//! (`Pathogenic/Likely pathogenic`, `Benign|Likely_benign`, ...). The
//! converters only care about two labels, so every raw value is reduced to
//! [`ClinicalLabel::Pathogenic`], [`ClinicalLabel::Benign`], or nothing.

use std::fmt;

use serde::Serialize;

/// Characters that separate terms in a multi-valued significance field.
const TERM_DELIMITERS: [char; 4] = ['|', '/', ',', ';'];

/// Cell contents that stand for "no value" in tabular ClinVar exports.
const MISSING_SENTINELS: [&str; 8] = ["NA", "N/A", "NaN", "nan", "null", "NULL", "None", "<NA>"];

/// Recognized significance terms, keyed by their normalized spelling.
const RECOGNIZED_TERMS: [(&str, Significance); 4] = [
    ("pathogenic", Significance::Pathogenic),
    ("likely_pathogenic", Significance::LikelyPathogenic),
    ("benign", Significance::Benign),
    ("likely_benign", Significance::LikelyBenign),
];

/// A recognized clinical significance term.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Significance {
    Pathogenic,
    LikelyPathogenic,
    Benign,
    LikelyBenign,
}

impl Significance {
    /// Collapses the likely qualifier away.
    pub fn label(self) -> ClinicalLabel {
        match self {
            Self::Pathogenic | Self::LikelyPathogenic => ClinicalLabel::Pathogenic,
            Self::Benign | Self::LikelyBenign => ClinicalLabel::Benign,
        }
    }

    pub fn is_likely(self) -> bool {
        matches!(self, Self::LikelyPathogenic | Self::LikelyBenign)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pathogenic => "Pathogenic",
            Self::LikelyPathogenic => "Likely_pathogenic",
            Self::Benign => "Benign",
            Self::LikelyBenign => "Likely_benign",
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two labels that may appear in converted output.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum ClinicalLabel {
    Pathogenic,
    Benign,
}

impl ClinicalLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pathogenic => "Pathogenic",
            Self::Benign => "Benign",
        }
    }
}

impl fmt::Display for ClinicalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true when a raw cell should be treated as absent.
pub fn is_missing_value(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || MISSING_SENTINELS.contains(&trimmed)
}

/// Normalize a raw clinical significance string.
///
/// Terms are scanned left to right and the first recognized one wins, so
/// `Benign|Pathogenic` is [`Significance::Benign`]. With `collapse_likely`
/// set, likely terms come back as their unqualified counterpart.
pub fn normalize(raw: Option<&str>, collapse_likely: bool) -> Option<Significance> {
    let raw = raw.filter(|value| !is_missing_value(value))?;

    raw.split(TERM_DELIMITERS)
        .find_map(|term| lookup_term(&normalize_term(term)))
        .map(|significance| {
            if collapse_likely {
                match significance.label() {
                    ClinicalLabel::Pathogenic => Significance::Pathogenic,
                    ClinicalLabel::Benign => Significance::Benign,
                }
            } else {
                significance
            }
        })
}

/// Shorthand used by both converters: normalize with likely collapsing and
/// return the output label.
pub fn classify(raw: Option<&str>) -> Option<ClinicalLabel> {
    normalize(raw, true).map(Significance::label)
}

fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase().replace(' ', "_")
}

fn lookup_term(key: &str) -> Option<Significance> {
    RECOGNIZED_TERMS
        .iter()
        .find(|(term, _)| *term == key)
        .map(|(_, significance)| *significance)
}
