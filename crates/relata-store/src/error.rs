//! Storage error types.

use thiserror::Error;

/// Errors from the report bucket.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport, authentication, or backend failure.
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// No object exists under the key.
    #[error("Report not found: {key}")]
    NotFound { key: String },

    /// The stored object is not valid UTF-8 text.
    #[error("Report {key} is not valid UTF-8: {source}")]
    Decode {
        key: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The key is not a valid object path (empty segment, `.`/`..`, control
    /// characters).
    #[error("Invalid report key {key}: {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: object_store::path::Error,
    },

    /// The bucket is not configured.
    #[error("Storage not configured: {0}")]
    NotConfigured(String),
}
