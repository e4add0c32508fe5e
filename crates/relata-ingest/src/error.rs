//! Input loading error types.

use relata_core::CoreError;
use thiserror::Error;

/// Errors raised while turning an uploaded file into a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Delimited-text parse failure (bad quoting, invalid UTF-8, ...).
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet container could not be opened or read.
    #[error("Failed to parse spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// The workbook has no worksheet to read.
    #[error("Spreadsheet has no worksheets")]
    NoWorksheet,

    /// No header row was found.
    #[error("Input file is empty (no header row)")]
    Empty,

    /// A data row has more fields than the header.
    #[error("Line {line}: expected at most {expected} fields, found {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The parsed cells do not form a valid dataset.
    #[error(transparent)]
    Dataset(#[from] CoreError),

    /// Reading the input file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
