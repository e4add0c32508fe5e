//! Delimited-text (CSV) reader.

use csv::ReaderBuilder;
use relata_core::dataset::normalize_headers;
use relata_core::{CellValue, TabularDataset};

use crate::IngestError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse CSV bytes: first record is the header, every other record a row.
///
/// Short rows are padded with [`CellValue::Empty`]; a row wider than the
/// header is rejected.
pub fn read_csv(bytes: &[u8]) -> Result<TabularDataset, IngestError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(IngestError::Empty);
    }
    let columns = normalize_headers(headers.iter());
    let width = columns.len();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > width {
            return Err(IngestError::RaggedRow {
                line: record.position().map_or(0, csv::Position::line),
                expected: width,
                found: record.len(),
            });
        }

        let mut row: Vec<CellValue> = record.iter().map(CellValue::infer).collect();
        row.resize(width, CellValue::Empty);
        rows.push(row);
    }

    Ok(TabularDataset::new(columns, rows)?)
}
