//! In-memory tabular dataset produced by the input loader.
//!
//! A [`TabularDataset`] is an ordered list of named columns plus rows of
//! scalar [`CellValue`]s aligned with those columns. It is immutable once
//! built: the report generator reads it as text and the HTML renderer reads
//! it as a table.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::errors::CoreError;

/// Display format for date-time cells.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single scalar cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Infer a typed value from a raw text field.
    ///
    /// Empty (after trimming) -> `Empty`, integers -> `Int`, other numbers ->
    /// `Float`, `true`/`false` in any case -> `Bool`, anything else is kept
    /// verbatim as `Text`.
    #[must_use]
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return Self::Int(value);
        }
        if let Ok(value) = trimmed.parse::<f64>() {
            if value.is_finite() {
                return Self::Float(value);
            }
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Self::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Self::Bool(false);
        }
        Self::Text(raw.to_string())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::DateTime(value) => write!(f, "{}", value.format(DATETIME_FORMAT)),
        }
    }
}

/// Ordered rows of scalar values under named, ordered columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabularDataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl TabularDataset {
    /// Build a dataset, checking that column names are unique and that every
    /// row carries exactly one cell per column.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] on a duplicate column name and
    /// [`CoreError::RowWidth`] on a row of the wrong width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate column name '{column}'"
                )));
            }
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(CoreError::RowWidth {
                    row: index,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }

        Ok(Self { columns, rows })
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column-keyed view of row `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row {
            columns: &self.columns,
            cells,
        })
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|cells| Row {
            columns: &self.columns,
            cells,
        })
    }

    /// Look up one cell by row index and column name.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.row(row).and_then(|r| r.get(column))
    }

    /// A copy of the first `n` rows (all rows when `n` exceeds the count).
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

/// Borrowed view of one row, mapping column names to values.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    cells: &'a [CellValue],
}

impl<'a> Row<'a> {
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        self.columns
            .iter()
            .position(|name| name == column)
            .and_then(|index| self.cells.get(index))
    }

    #[must_use]
    pub const fn cells(&self) -> &'a [CellValue] {
        self.cells
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(self) -> impl Iterator<Item = (&'a str, &'a CellValue)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter())
    }
}

/// Turn raw header cells into unique column names.
///
/// Empty headers become `Unnamed: {index}`; repeated names get `.1`, `.2`, ...
/// suffixes in order of appearance. Surrounding whitespace is part of the name.
#[must_use]
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut columns: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (index, header) in raw.into_iter().enumerate() {
        let header = header.as_ref();
        let base = if header.is_empty() {
            format!("Unnamed: {index}")
        } else {
            header.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        columns.push(name);
    }

    columns
}
