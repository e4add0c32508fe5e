//! S3 report bucket configuration.

use serde::{Deserialize, Serialize};

/// Default bucket region.
fn default_region() -> String {
    String::from("sa-east-1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Config {
    /// AWS access key ID.
    #[serde(default)]
    pub access_key_id: String,

    /// AWS secret access key.
    #[serde(default)]
    pub secret_access_key: String,

    /// Bucket holding rendered reports. Empty disables history and upload.
    #[serde(default)]
    pub bucket_name: String,

    /// Bucket region.
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint URL (S3-compatible stores). If empty, AWS is used.
    #[serde(default)]
    pub endpoint: String,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            secret_access_key: String::new(),
            bucket_name: String::new(),
            region: default_region(),
            endpoint: String::new(),
        }
    }
}

impl S3Config {
    /// A bucket name is the only hard requirement; credentials may come from
    /// the standard AWS environment.
    pub fn is_configured(&self) -> bool {
        !self.bucket_name.is_empty()
    }

    /// Check if explicit static credentials are set.
    pub fn has_credentials(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }

    /// Public URL of `key` inside the configured bucket.
    ///
    /// Virtual-hosted AWS style unless a custom `endpoint` is set, in which
    /// case path style is used.
    pub fn public_url(&self, key: &str) -> String {
        if self.endpoint.is_empty() {
            format!(
                "https://{}.s3.{}.amazonaws.com/{key}",
                self.bucket_name, self.region
            )
        } else {
            format!(
                "{}/{}/{key}",
                self.endpoint.trim_end_matches('/'),
                self.bucket_name
            )
        }
    }
}
