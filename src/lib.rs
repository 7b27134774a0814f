#![doc = include_str!("../README.md")]

pub mod cli;
pub mod conversion;
pub mod input;
pub mod output;
pub mod significance;
pub mod smart_reader;
pub mod tsv;
pub mod vcf;

pub use conversion::{ConversionConfig, ConversionError, ConversionSummary, convert_file};
pub use output::OutputRow;
pub use significance::{ClinicalLabel, Significance, normalize};
