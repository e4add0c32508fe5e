use anyhow::Context;
use relata_config::RelataConfig;
use relata_report::{GeminiClient, ReportGenerator};
use relata_store::ReportStore;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: RelataConfig,
    pub generator: ReportGenerator<GeminiClient>,
    /// `None` when no bucket is configured or the client failed to build.
    pub store: Option<ReportStore>,
}

impl AppContext {
    /// Build the model client and, when configured, the bucket client.
    ///
    /// Fails only if the model client cannot be built. A missing or broken
    /// bucket configuration disables history and uploads instead.
    pub fn init(config: RelataConfig) -> anyhow::Result<Self> {
        let client = GeminiClient::new(&config.gemini)
            .context("failed to initialize the Gemini client (set GEMINI_API_KEY)")?;

        let store = if config.s3.is_configured() {
            match ReportStore::from_config(&config.s3) {
                Ok(store) => Some(store),
                Err(error) => {
                    tracing::warn!(%error, "failed to initialize report store; history disabled");
                    None
                }
            }
        } else {
            tracing::debug!("no bucket configured; history disabled");
            None
        };

        let generator = ReportGenerator::new(client);
        tracing::debug!(
            model = generator.model().model(),
            history = store.is_some(),
            "application context ready"
        );

        Ok(Self {
            config,
            generator,
            store,
        })
    }
}
