//! # relata-core
//!
//! Core types shared across all Relata crates:
//! - The tabular dataset loaded from an uploaded spreadsheet
//! - The structured report returned by the language model and its rendered
//!   HTML document
//! - Storage key generation for rendered reports
//! - Cross-cutting error types

pub mod dataset;
pub mod errors;
pub mod key;
pub mod report;

pub use dataset::{CellValue, Row, TabularDataset};
pub use errors::CoreError;
pub use key::ReportKey;
pub use report::{RenderedReport, ReportRequest, ReportSection, StorageObject, StructuredReport};
