//! # relata-store
//!
//! Storage gateway for rendered reports: put, list, and get against a single
//! bucket. Each operation is one awaited round-trip with no retry.
//!
//! Production uses S3 through `object_store`'s `AmazonS3`; any other
//! [`ObjectStore`] (e.g. `InMemory`) can be injected with [`ReportStore::new`].

mod error;

pub use error::StoreError;

use std::sync::Arc;

use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use relata_config::S3Config;
use relata_core::{RenderedReport, StorageObject};

/// Builds the public URL of a key.
type UrlFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Report bucket client.
#[derive(Clone)]
pub struct ReportStore {
    store: Arc<dyn ObjectStore>,
    url_for: UrlFn,
}

impl std::fmt::Debug for ReportStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportStore")
            .field("store", &self.store.to_string())
            .finish_non_exhaustive()
    }
}

impl ReportStore {
    /// Wrap any object store. `public_base` prefixes keys to form URLs.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, public_base: impl Into<String>) -> Self {
        let base = public_base.into();
        let base = base.trim_end_matches('/').to_string();
        Self {
            store,
            url_for: Arc::new(move |key| format!("{base}/{key}")),
        }
    }

    /// Connect to the configured S3 bucket.
    ///
    /// Standard `AWS_*` environment variables form the base; explicit config
    /// values override them.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotConfigured`] without a bucket name and
    /// [`StoreError::ObjectStore`] if the client cannot be built.
    pub fn from_config(config: &S3Config) -> Result<Self, StoreError> {
        if !config.is_configured() {
            return Err(StoreError::NotConfigured(String::from(
                "s3.bucket_name is empty",
            )));
        }

        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&config.bucket_name)
            .with_region(&config.region);
        if config.has_credentials() {
            builder = builder
                .with_access_key_id(&config.access_key_id)
                .with_secret_access_key(&config.secret_access_key);
        }
        if !config.endpoint.is_empty() {
            builder = builder
                .with_endpoint(&config.endpoint)
                .with_allow_http(config.endpoint.starts_with("http://"));
        }

        let store = builder.build()?;
        let config = config.clone();
        tracing::debug!(bucket = %config.bucket_name, region = %config.region, "connected report store");
        Ok(Self {
            store: Arc::new(store),
            url_for: Arc::new(move |key| config.public_url(key)),
        })
    }

    /// Public URL of `key`.
    #[must_use]
    pub fn url(&self, key: &str) -> String {
        (self.url_for)(key)
    }

    /// Upload a rendered report under `key` as `text/html`.
    ///
    /// Returns the public URL on success. An existing object under the same
    /// key is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] for a key that is not a valid object
    /// path and [`StoreError::ObjectStore`] on any transport or auth failure.
    pub async fn put(&self, key: &str, report: &RenderedReport) -> Result<String, StoreError> {
        self.put_object(&StorageObject::html(key, report)).await
    }

    /// Upload an arbitrary storage object.
    ///
    /// # Errors
    ///
    /// See [`Self::put`].
    pub async fn put_object(&self, object: &StorageObject) -> Result<String, StoreError> {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, object.content_type.clone().into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(
                &location(&object.key)?,
                PutPayload::from(object.content.clone()),
                options,
            )
            .await?;

        tracing::info!(key = %object.key, bytes = object.content.len(), "report uploaded");
        Ok(self.url(&object.key))
    }

    /// All keys in the bucket, sorted descending.
    ///
    /// The sort is lexical. Generated keys embed a zero-padded timestamp so
    /// same-named reports come newest first; keys added by other tools follow
    /// plain string order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ObjectStore`] if listing fails.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let objects: Vec<_> = self.store.list(None).try_collect().await?;
        let mut keys: Vec<String> = objects
            .into_iter()
            .map(|meta| meta.location.to_string())
            .collect();
        keys.sort_unstable_by(|a, b| b.cmp(a));
        tracing::debug!(count = keys.len(), "listed reports");
        Ok(keys)
    }

    /// Fetch the text content stored under `key`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an absent key, [`StoreError::Decode`] for
    /// non-UTF-8 content, [`StoreError::InvalidKey`] for a malformed key,
    /// [`StoreError::ObjectStore`] otherwise.
    pub async fn get(&self, key: &str) -> Result<String, StoreError> {
        let result = match self.store.get(&location(key)?).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                return Err(StoreError::NotFound {
                    key: key.to_string(),
                });
            }
            Err(error) => return Err(error.into()),
        };

        let bytes = result.bytes().await?;
        tracing::debug!(key, bytes = bytes.len(), "fetched report");
        String::from_utf8(bytes.to_vec()).map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })
    }
}

/// Object path for `key`, kept byte-for-byte. `Path::from` percent-encodes
/// non-ASCII and reserved characters.
fn location(key: &str) -> Result<Path, StoreError> {
    Path::parse(key).map_err(|source| StoreError::InvalidKey {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use object_store::memory::InMemory;
    use pretty_assertions::assert_eq;

    use super::*;

    fn memory_store() -> ReportStore {
        ReportStore::new(Arc::new(InMemory::new()), "https://bucket.example/")
    }

    #[test]
    fn url_joins_base_and_key() {
        assert_eq!(
            memory_store().url("a.html"),
            "https://bucket.example/a.html"
        );
    }

    #[test]
    fn from_config_requires_bucket() {
        let err = ReportStore::from_config(&S3Config::default()).unwrap_err();
        assert!(matches!(err, StoreError::NotConfigured(_)));
    }

    #[test]
    fn from_config_uses_region_url() {
        let config = S3Config {
            bucket_name: "relatorios".into(),
            access_key_id: "AKIA".into(),
            secret_access_key: "secret".into(),
            ..Default::default()
        };
        let store = ReportStore::from_config(&config).unwrap();
        assert_eq!(
            store.url("k.html"),
            "https://relatorios.s3.sa-east-1.amazonaws.com/k.html"
        );
    }

    #[tokio::test]
    async fn put_records_content_type() {
        let memory = Arc::new(InMemory::new());
        let store = ReportStore::new(memory.clone(), "https://b");
        store
            .put("r.html", &RenderedReport::new("<html></html>".into()))
            .await
            .unwrap();

        let result = memory.get(&Path::from("r.html")).await.unwrap();
        let content_type: Option<&str> = result
            .attributes
            .get(&Attribute::ContentType)
            .map(AsRef::as_ref);
        assert_eq!(content_type, Some("text/html"));
    }

    #[test]
    fn location_keeps_accents_and_reserved_characters() {
        for key in [
            "relatório_mensal_2024-01-05_10-00-00.html",
            "q1_#2_2024-01-05_10-00-00.html",
            "folha_[v2]_2024-01-05_10-00-00.html",
        ] {
            assert_eq!(location(key).unwrap().as_ref(), key);
        }
    }

    #[test]
    fn location_rejects_empty_segments() {
        let err = location("a//b.html").unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey { .. }));
    }

    #[tokio::test]
    async fn non_utf8_content_is_decode_error() {
        let memory = Arc::new(InMemory::new());
        memory
            .put(&Path::from("bin.html"), PutPayload::from(vec![0xFF, 0xFE]))
            .await
            .unwrap();
        let store = ReportStore::new(memory, "https://b");

        let err = store.get("bin.html").await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }
}
