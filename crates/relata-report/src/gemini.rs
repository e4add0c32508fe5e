//! Gemini `generateContent` client.

use relata_config::GeminiConfig;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::http::check_response;
use crate::model::TextModel;

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// HTTP client for the Gemini text-generation API.
///
/// No retry and no request timeout are configured: a slow or failing call
/// surfaces to the caller as-is.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotConfigured`] when the API key or model is
    /// missing and [`ModelError::Http`] if the HTTP client fails to build.
    pub fn new(config: &GeminiConfig) -> Result<Self, ModelError> {
        let config = config
            .require()
            .map_err(|error| ModelError::NotConfigured(error.to_string()))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("relata/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.generate_content_url(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl TextModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(model = %self.model, prompt_bytes = prompt.len(), "calling generateContent");
        let resp = check_response(
            self.http
                .post(&self.endpoint)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?,
        )
        .await?;

        let data: GenerateContentResponse = resp.json().await?;
        extract_text(data)
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(data: GenerateContentResponse) -> Result<String, ModelError> {
    let block_reason = data.prompt_feedback.and_then(|feedback| feedback.block_reason);

    let Some(candidate) = data.candidates.into_iter().next() else {
        return Err(ModelError::EmptyResponse(block_reason.map_or_else(
            || String::from("no candidates returned"),
            |reason| format!("prompt blocked ({reason})"),
        )));
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| String::from("unknown"));
        return Err(ModelError::EmptyResponse(format!(
            "candidate has no text (finish reason {reason})"
        )));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FIXTURE: &str = r#"{
        "candidates": [
            {
                "content": {
                    "parts": [
                        {"text": "```json\n{\"titulo\": \"Horas\""},
                        {"text": "}\n```"}
                    ],
                    "role": "model"
                },
                "finishReason": "STOP",
                "index": 0
            }
        ],
        "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5}
    }"#;

    #[test]
    fn request_body_shape() {
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: "oi" }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"contents": [{"role": "user", "parts": [{"text": "oi"}]}]})
        );
    }

    #[test]
    fn extracts_concatenated_parts() {
        let data: GenerateContentResponse = serde_json::from_str(FIXTURE).unwrap();
        let text = extract_text(data).unwrap();
        assert_eq!(text, "```json\n{\"titulo\": \"Horas\"}\n```");
    }

    #[test]
    fn blocked_prompt_is_empty_response() {
        let data: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        let err = extract_text(data).unwrap_err();
        match err {
            ModelError::EmptyResponse(reason) => assert!(reason.contains("SAFETY")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn candidate_without_text_is_empty_response() {
        let data: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#).unwrap();
        let err = extract_text(data).unwrap_err();
        assert!(matches!(err, ModelError::EmptyResponse(reason) if reason.contains("MAX_TOKENS")));
    }

    #[test]
    fn client_requires_api_key() {
        let err = GeminiClient::new(&GeminiConfig::default()).unwrap_err();
        assert!(matches!(err, ModelError::NotConfigured(_)));
    }

    #[test]
    fn client_builds_with_key() {
        let config = GeminiConfig {
            api_key: "test-key".into(),
            ..Default::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(client.model(), "gemini-1.5-flash");
        assert!(client.endpoint.ends_with("/models/gemini-1.5-flash:generateContent"));
    }
}
