//! Turning raw model text into a [`StructuredReport`].

use relata_core::{ReportSection, StructuredReport};
use serde_json::{Map, Value};

use crate::error::GenerationError;

/// Remove Markdown code-fence markers and surrounding whitespace.
///
/// Text without fences is returned trimmed and otherwise unchanged.
#[must_use]
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Validate a model response.
///
/// The text must be a JSON object once fences are stripped. Each of the four
/// expected keys that is missing, `null`, or not a string falls back to its
/// placeholder and is listed in [`StructuredReport::degraded`].
///
/// # Errors
///
/// [`GenerationError::InvalidJson`] for unparseable text,
/// [`GenerationError::UnexpectedShape`] for JSON that is not an object.
pub fn parse_report(raw: &str) -> Result<StructuredReport, GenerationError> {
    let stripped = strip_code_fences(raw);
    let value: Value = serde_json::from_str(&stripped)?;
    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(GenerationError::UnexpectedShape(
                json_kind(&other).to_string(),
            ));
        }
    };

    let mut degraded = Vec::new();
    let mut field = |section: ReportSection| take_field(&map, section, &mut degraded);
    let title = field(ReportSection::Title);
    let executive_summary = field(ReportSection::ExecutiveSummary);
    let insights = field(ReportSection::Insights);
    let recommendations = field(ReportSection::Recommendations);

    Ok(StructuredReport {
        title,
        executive_summary,
        insights,
        recommendations,
        degraded,
    })
}

fn take_field(
    map: &Map<String, Value>,
    section: ReportSection,
    degraded: &mut Vec<ReportSection>,
) -> String {
    match map.get(section.json_key()) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => {
            tracing::warn!(field = section.json_key(), "model response missing field");
            degraded.push(section);
            section.placeholder().to_string()
        }
        Some(other) => {
            tracing::warn!(
                field = section.json_key(),
                kind = json_kind(other),
                "model response field is not a string"
            );
            degraded.push(section);
            section.placeholder().to_string()
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
