//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default number of rows shown by `relata preview`.
const fn default_preview_rows() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Rows shown when previewing an uploaded file.
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            preview_rows: default_preview_rows(),
        }
    }
}
