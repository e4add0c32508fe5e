//! # relata-config
//!
//! Layered configuration loading for Relata using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RELATA_*` prefix, `__` as separator)
//! 2. Flat secret names (`GEMINI_API_KEY`, `AWS_ACCESS_KEY_ID`,
//!    `AWS_SECRET_ACCESS_KEY`, `S3_BUCKET_NAME`, `AWS_REGION`)
//! 3. Project-level `.relata/config.toml`
//! 4. User-level `~/.config/relata/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RELATA_GEMINI__API_KEY` -> `gemini.api_key`,
//! `RELATA_S3__BUCKET_NAME` -> `s3.bucket_name`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use relata_config::RelataConfig;
//!
//! let config = RelataConfig::load_with_dotenv().expect("config");
//!
//! if config.s3.is_configured() {
//!     println!("bucket: {}", config.s3.bucket_name);
//! }
//! ```

mod error;
mod gemini;
mod general;
mod s3;

pub use error::ConfigError;
pub use gemini::GeminiConfig;
pub use general::GeneralConfig;
pub use s3::S3Config;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Flat variable names and the config paths they fill.
const FLAT_SECRET_KEYS: [(&str, &str); 5] = [
    ("GEMINI_API_KEY", "gemini.api_key"),
    ("AWS_ACCESS_KEY_ID", "s3.access_key_id"),
    ("AWS_SECRET_ACCESS_KEY", "s3.secret_access_key"),
    ("S3_BUCKET_NAME", "s3.bucket_name"),
    ("AWS_REGION", "s3.region"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RelataConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub s3: S3Config,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RelataConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source fails to parse or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".relata/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Flat secret names
        figment = figment.merge(Self::flat_secrets());

        // Layer 4: Prefixed environment variables (highest priority)
        figment.merge(Env::prefixed("RELATA_").split("__"))
    }

    /// Map the flat, unprefixed secret names onto their config paths.
    fn flat_secrets() -> Env {
        Env::raw().filter_map(|key| {
            let upper = key.as_str().to_ascii_uppercase();
            FLAT_SECRET_KEYS
                .iter()
                .find(|(name, _)| *name == upper)
                .map(|(_, path)| (*path).into())
        })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("relata").join("config.toml"))
    }

    /// Load `.env` from the current directory. Silently does nothing if absent.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = RelataConfig::default();
        assert!(!config.gemini.is_configured());
        assert!(!config.s3.is_configured());
        assert_eq!(config.general.preview_rows, 5);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: RelataConfig = RelataConfig::figment().extract()?;
            assert_eq!(config.gemini.model, "gemini-1.5-flash");
            assert_eq!(config.general.preview_rows, 5);
            Ok(())
        });
    }
}
