//! The text-generation seam.

use std::future::Future;

use crate::error::ModelError;

/// A model that turns one prompt into one text response.
///
/// [`crate::GeminiClient`] is the production implementation; tests supply
/// scripted fakes.
pub trait TextModel {
    /// Send `prompt` and return the raw response text.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, ModelError>> + Send;
}
