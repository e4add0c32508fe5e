//! Gemini text-generation API configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_model() -> String {
    String::from("gemini-1.5-flash")
}

fn default_base_url() -> String {
    String::from("https://generativelanguage.googleapis.com")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`.
    #[serde(default)]
    pub api_key: String,

    /// Model name, e.g. `gemini-1.5-flash`.
    #[serde(default = "default_model")]
    pub model: String,

    /// API root. Overridable for proxies and local fakes.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

impl GeminiConfig {
    /// Check if an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Fail unless the section is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the API key is missing and
    /// [`ConfigError::InvalidValue`] when the model name is blank.
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: String::from("gemini"),
            });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: String::from("gemini.model"),
                reason: String::from("model name must not be empty"),
            });
        }
        Ok(self)
    }

    /// Full `generateContent` endpoint for the configured model.
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = GeminiConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.model, "gemini-1.5-flash");
        assert!(matches!(
            config.require(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn blank_model_is_invalid() {
        let config = GeminiConfig {
            api_key: "key".into(),
            model: "  ".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.require(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn generate_content_url_joins_base_and_model() {
        let config = GeminiConfig {
            api_key: "key".into(),
            base_url: "http://localhost:8080/".into(),
            ..Default::default()
        };
        assert_eq!(
            config.generate_content_url(),
            "http://localhost:8080/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
