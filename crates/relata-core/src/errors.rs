//! Cross-cutting error types for Relata.
//!
//! Component errors (`IngestError`, `GenerationError`, `StoreError`) live in
//! their own crates. They converge into `anyhow` in `relata-cli`.

use thiserror::Error;

/// Errors raised while building core values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A data row does not have one cell per column.
    #[error("Row {row} has {found} cells but the dataset has {expected} columns")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
