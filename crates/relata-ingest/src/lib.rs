//! # relata-ingest
//!
//! Turns an uploaded file into a [`TabularDataset`].
//!
//! Dispatch is by file extension only: `.csv` is parsed as delimited text,
//! every other extension as a spreadsheet workbook. There is no content
//! sniffing and no schema validation.

mod delimited;
mod error;
mod spreadsheet;

pub use delimited::read_csv;
pub use error::IngestError;
pub use spreadsheet::read_spreadsheet;

use std::fmt;
use std::path::Path;

use relata_core::TabularDataset;

/// The two supported input encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Spreadsheet,
}

impl InputFormat {
    /// Pick the format for an extension, with or without the leading dot.
    ///
    /// Only `csv` (ASCII case-insensitive) selects [`InputFormat::Csv`].
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        if extension.eq_ignore_ascii_case("csv") {
            Self::Csv
        } else {
            Self::Spreadsheet
        }
    }

    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Spreadsheet, Self::from_extension)
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Spreadsheet => f.write_str("spreadsheet"),
        }
    }
}

/// Parse `bytes` according to `extension`.
///
/// # Errors
///
/// Returns [`IngestError`] when the bytes are not a valid file of the
/// selected format or contain no header row.
pub fn load_input(bytes: &[u8], extension: &str) -> Result<TabularDataset, IngestError> {
    load_as(bytes, InputFormat::from_extension(extension))
}

/// Parse `bytes` as `format`.
///
/// # Errors
///
/// See [`load_input`].
pub fn load_as(bytes: &[u8], format: InputFormat) -> Result<TabularDataset, IngestError> {
    let dataset = match format {
        InputFormat::Csv => read_csv(bytes)?,
        InputFormat::Spreadsheet => read_spreadsheet(bytes)?,
    };
    tracing::debug!(
        %format,
        bytes = bytes.len(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "loaded input"
    );
    Ok(dataset)
}

/// Read a file from disk and parse it by its extension.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be read, otherwise see
/// [`load_input`].
pub fn load_path(path: &Path) -> Result<TabularDataset, IngestError> {
    let bytes = std::fs::read(path)?;
    load_as(&bytes, InputFormat::from_path(path))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("csv", InputFormat::Csv)]
    #[case(".csv", InputFormat::Csv)]
    #[case("CSV", InputFormat::Csv)]
    #[case("xlsx", InputFormat::Spreadsheet)]
    #[case(".ods", InputFormat::Spreadsheet)]
    #[case("", InputFormat::Spreadsheet)]
    #[case("txt", InputFormat::Spreadsheet)]
    fn extension_dispatch(#[case] extension: &str, #[case] expected: InputFormat) {
        assert_eq!(InputFormat::from_extension(extension), expected);
    }

    #[test]
    fn path_without_extension_is_spreadsheet() {
        assert_eq!(
            InputFormat::from_path(Path::new("planilha")),
            InputFormat::Spreadsheet
        );
        assert_eq!(
            InputFormat::from_path(Path::new("dir/Monthly Report.csv")),
            InputFormat::Csv
        );
    }

    #[test]
    fn csv_content_with_other_extension_is_not_sniffed() {
        let result = load_input(b"a,b\n1,2\n", "xlsx");
        assert!(matches!(result, Err(IngestError::Spreadsheet(_))));
    }
}
