//! Report generation error types.

use thiserror::Error;

/// Errors from the text-generation API.
#[derive(Debug, Error)]
pub enum ModelError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned 429 Too Many Requests. Reported, never retried.
    #[error("rate limited (server asked to wait {retry_after_secs}s)")]
    RateLimited {
        /// Seconds the server asked the caller to wait.
        retry_after_secs: u64,
    },

    /// The API answered without any generated text.
    #[error("model returned no text: {0}")]
    EmptyResponse(String),

    /// The client cannot be built from the current configuration.
    #[error("model client not configured: {0}")]
    NotConfigured(String),
}

/// Errors that abort a report generation. No partial report accompanies them.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The model call itself failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The model response is not valid JSON after fence stripping.
    #[error("model response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The model response is valid JSON but not an object.
    #[error("model response has unexpected shape: expected a JSON object, got {0}")]
    UnexpectedShape(String),
}
