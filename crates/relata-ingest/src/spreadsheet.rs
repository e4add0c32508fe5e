//! Spreadsheet (xlsx, xlsm, xlsb, xls, ods) reader built on calamine.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::NaiveDateTime;
use relata_core::dataset::normalize_headers;
use relata_core::{CellValue, TabularDataset};

use crate::IngestError;

/// Parse the first worksheet of a workbook.
///
/// The first row of the used range is the header. Rows whose cells are all
/// empty are skipped.
pub fn read_spreadsheet(bytes: &[u8]) -> Result<TabularDataset, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)??;

    let mut rows_iter = range.rows();
    let header = rows_iter.next().ok_or(IngestError::Empty)?;
    let columns = normalize_headers(header.iter().map(header_text));

    let rows = rows_iter
        .map(|row| row.iter().map(cell_value).collect::<Vec<_>>())
        .filter(|row| !row.iter().all(CellValue::is_empty))
        .collect();

    Ok(TabularDataset::new(columns, rows)?)
}

/// Header cells keep their text verbatim, whitespace included.
fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(value) => value.clone(),
        other => cell_value(other).to_string(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => CellValue::Float(*value),
        Data::String(value) if value.trim().is_empty() => CellValue::Empty,
        Data::String(value) => CellValue::Text(value.clone()),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(value) => value
            .as_datetime()
            .map_or_else(|| CellValue::Float(value.as_f64()), CellValue::DateTime),
        Data::DateTimeIso(value) => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
            .map_or_else(|_| CellValue::Text(value.clone()), CellValue::DateTime),
        Data::DurationIso(value) => CellValue::Text(value.clone()),
        Data::Error(error) => CellValue::Text(error.to_string()),
        Data::Empty => CellValue::Empty,
    }
}
