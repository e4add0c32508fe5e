//! # relata-report
//!
//! Report generation for Relata:
//! 1. Render the dataset as a text table and embed it in a fixed prompt
//! 2. Send the prompt to a [`TextModel`] (Gemini in production)
//! 3. Strip code fences and validate the JSON response into a
//!    [`StructuredReport`], degrading missing fields to placeholders
//! 4. Render the report plus the full data table as one HTML document
//!
//! The pipeline is linear: one model call, no retries, no streaming.

mod error;
mod gemini;
mod http;
mod model;

pub mod html;
pub mod parse;
pub mod prompt;

pub use error::{GenerationError, ModelError};
pub use gemini::GeminiClient;
pub use model::TextModel;

use relata_core::{RenderedReport, ReportRequest, StructuredReport};

/// Output of a successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub report: StructuredReport,
    pub html: RenderedReport,
}

/// Drives one dataset through prompt, model, validation, and rendering.
#[derive(Debug, Clone)]
pub struct ReportGenerator<M> {
    model: M,
}

impl<M: TextModel> ReportGenerator<M> {
    #[must_use]
    pub const fn new(model: M) -> Self {
        Self { model }
    }

    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Generate and render a report for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the model call fails or its response
    /// cannot be parsed. Missing report fields are not errors.
    pub async fn generate(
        &self,
        request: &ReportRequest<'_>,
    ) -> Result<GeneratedReport, GenerationError> {
        let prompt = prompt::build_prompt(request.dataset);
        tracing::debug!(
            file = request.file_name,
            rows = request.dataset.row_count(),
            prompt_bytes = prompt.len(),
            "requesting report"
        );

        let raw = self.model.generate(&prompt).await?;
        tracing::debug!(response_bytes = raw.len(), "model responded");

        let report = parse::parse_report(&raw)?;
        let table = html::dataset_to_html(request.dataset);
        let html = html::render_report(&report, request.file_name, &table);

        tracing::info!(
            file = request.file_name,
            html_bytes = html.len(),
            degraded = report.degraded.len(),
            "report generated"
        );
        Ok(GeneratedReport { report, html })
    }
}
