use std::path::Path;

use crate::conversion::ConversionError;

/// Suffixes that only describe a compression layer.
const COMPRESSION_SUFFIXES: [&str; 2] = ["gz", "bgz"];

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InputFormat {
    /// Tab-delimited summary table (`variant_summary.txt.gz` and friends)
    Table,
    /// Variant Call Format
    CallFile,
}

impl InputFormat {
    /// Pick a converter from the file name alone.
    ///
    /// Compression suffixes are peeled first and the innermost format suffix
    /// decides: `.tsv`/`.txt` is a table, `.vcf` is a call file. A bare
    /// compressed file with no recognizable inner suffix is treated as a
    /// call file.
    pub fn detect(path: &Path) -> Result<Self, ConversionError> {
        let unsupported = || ConversionError::UnsupportedInputType {
            path: path.to_path_buf(),
        };

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .ok_or_else(unsupported)?;

        // The first component is the stem, not a suffix.
        let mut suffixes: Vec<&str> = filename.split('.').skip(1).collect();
        let mut compressed = false;
        while let Some(last) = suffixes.last()
            && COMPRESSION_SUFFIXES.contains(last)
        {
            compressed = true;
            suffixes.pop();
        }

        let format = match suffixes.last() {
            Some(&("tsv" | "txt")) => Some(Self::Table),
            Some(&"vcf") => Some(Self::CallFile),
            _ if compressed => Some(Self::CallFile),
            _ => None,
        };

        tracing::debug!(input = %path.display(), ?format, compressed, "detected input format");
        format.ok_or_else(unsupported)
    }
}
