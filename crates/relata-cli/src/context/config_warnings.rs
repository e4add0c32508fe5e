use relata_config::RelataConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &RelataConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &RelataConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.gemini.is_configured() && has_env_prefix(&env_keys, "RELATA_GEMINI") {
        warnings.push(
            "Gemini config appears default while RELATA_GEMINI* env vars exist. Use double underscores (example: RELATA_GEMINI__API_KEY)."
                .to_string(),
        );
    }

    if !config.s3.is_configured() && has_env_prefix(&env_keys, "RELATA_S3") {
        warnings.push(
            "S3 config appears default while RELATA_S3* env vars exist. Use double underscores (example: RELATA_S3__BUCKET_NAME)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
