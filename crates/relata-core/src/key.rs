//! Storage keys for rendered reports.
//!
//! Keys have the shape `{clean_base_name}_{YYYY-MM-DD_HH-MM-SS}.html`. The
//! timestamp is zero-padded and most-significant-first, so a descending
//! lexical sort of keys sharing a base name is newest-first.

use std::fmt;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

/// Timestamp layout embedded in every key.
pub const KEY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Extension appended to every key.
pub const KEY_EXTENSION: &str = "html";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ReportKey(String);

impl ReportKey {
    /// Derive the key for `file_name` generated at `timestamp`.
    #[must_use]
    pub fn new(file_name: &str, timestamp: NaiveDateTime) -> Self {
        Self(format!(
            "{}_{}.{KEY_EXTENSION}",
            clean_base_name(file_name),
            timestamp.format(KEY_TIMESTAMP_FORMAT)
        ))
    }

    /// Derive the key for `file_name` using the local wall clock.
    #[must_use]
    pub fn now(file_name: &str) -> Self {
        Self::new(file_name, Local::now().naive_local())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ReportKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Drop the last extension, replace spaces with underscores, lowercase.
#[must_use]
pub fn clean_base_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name);
    stem.replace(' ', "_").to_lowercase()
}
