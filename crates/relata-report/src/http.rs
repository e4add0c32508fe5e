//! Mapping of non-success Gemini responses onto [`ModelError`].
//!
//! Google APIs answer errors with an envelope like
//! `{"error": {"code": 400, "message": "...", "status": "INVALID_ARGUMENT"}}`.
//! Quota errors (429) may carry a `RetryInfo` detail with `retryDelay: "37s"`.

use serde::Deserialize;

use crate::error::ModelError;

/// Wait reported when neither the header nor the body names one.
const DEFAULT_RETRY_SECS: u64 = 60;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    retry_delay: Option<String>,
}

/// Pass successful responses through; turn anything else into a [`ModelError`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ModelError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let header_delay = retry_after_header(&resp);
    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), body_bytes = body.len(), "gemini error response");
    Err(error_from_body(status.as_u16(), header_delay, &body))
}

fn error_from_body(status: u16, header_delay: Option<u64>, body: &str) -> ModelError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error);

    if status == 429 {
        let retry_after_secs = header_delay
            .or_else(|| parsed.as_ref().and_then(body_retry_delay))
            .unwrap_or(DEFAULT_RETRY_SECS);
        return ModelError::RateLimited { retry_after_secs };
    }

    let message = match parsed {
        Some(error) if !error.message.is_empty() && !error.status.is_empty() => {
            format!("{}: {}", error.status, error.message)
        }
        Some(error) if !error.message.is_empty() => error.message,
        _ => body.trim().to_string(),
    };
    ModelError::Api { status, message }
}

fn retry_after_header(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Whole seconds of the first `retryDelay` detail (`"37s"`, `"1.5s"`).
fn body_retry_delay(error: &ApiErrorBody) -> Option<u64> {
    error
        .details
        .iter()
        .filter_map(|detail| detail.retry_delay.as_deref())
        .find_map(|delay| delay.strip_suffix('s')?.split('.').next()?.parse().ok())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const INVALID_KEY: &str = r#"{
      "error": {
        "code": 400,
        "message": "API key not valid. Please pass a valid API key.",
        "status": "INVALID_ARGUMENT"
      }
    }"#;

    const QUOTA: &str = r#"{
      "error": {
        "code": 429,
        "message": "Resource has been exhausted.",
        "status": "RESOURCE_EXHAUSTED",
        "details": [
          {"@type": "type.googleapis.com/google.rpc.QuotaFailure", "violations": []},
          {"@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": "37s"}
        ]
      }
    }"#;

    fn response(status: u16, retry_after: Option<&str>, body: &'static str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body(body).unwrap())
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(response(200, None, "{}")).await.is_ok());
    }

    #[tokio::test]
    async fn api_error_uses_envelope_status_and_message() {
        let err = check_response(response(400, None, INVALID_KEY))
            .await
            .unwrap_err();
        match err {
            ModelError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(
                    message,
                    "INVALID_ARGUMENT: API key not valid. Please pass a valid API key."
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_keeps_trimmed_body() {
        let err = check_response(response(502, None, "  Bad Gateway\n"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::Api { status: 502, ref message } if message == "Bad Gateway"
        ));
    }

    #[tokio::test]
    async fn quota_error_reads_retry_info_delay() {
        let err = check_response(response(429, None, QUOTA)).await.unwrap_err();
        assert!(matches!(
            err,
            ModelError::RateLimited {
                retry_after_secs: 37
            }
        ));
    }

    #[test]
    fn retry_after_header_wins_over_body() {
        let err = error_from_body(429, Some(5), QUOTA);
        assert!(matches!(
            err,
            ModelError::RateLimited {
                retry_after_secs: 5
            }
        ));
    }

    #[test]
    fn rate_limit_without_hint_uses_default() {
        let err = error_from_body(429, None, "slow down");
        assert!(matches!(
            err,
            ModelError::RateLimited {
                retry_after_secs: DEFAULT_RETRY_SECS
            }
        ));
    }

    #[test]
    fn fractional_retry_delay_truncates() {
        let body = r#"{"error":{"details":[{"retryDelay":"1.5s"}]}}"#;
        assert!(matches!(
            error_from_body(429, None, body),
            ModelError::RateLimited {
                retry_after_secs: 1
            }
        ));
    }

    #[test]
    fn non_numeric_retry_after_header_is_ignored() {
        let resp = response(429, Some("soon"), "");
        assert_eq!(retry_after_header(&resp), None);
    }
}
