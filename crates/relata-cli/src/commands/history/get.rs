use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::history::HistoryGetArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct GetResponse {
    key: String,
    path: String,
    bytes: usize,
}

pub async fn handle(args: &HistoryGetArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx
        .store
        .as_ref()
        .context("history is unavailable: no bucket configured")?;

    let html = store
        .get(&args.key)
        .await
        .with_context(|| format!("failed to fetch report {}", args.key))?;

    if args.stdout {
        print!("{html}");
        return Ok(());
    }

    let path = destination(args);
    std::fs::write(&path, &html).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(key = %args.key, path = %path.display(), "report downloaded");

    output(
        &GetResponse {
            key: args.key.clone(),
            path: path.display().to_string(),
            bytes: html.len(),
        },
        flags.format,
    )
}

/// `--out` when given, otherwise the key's last path segment in the working directory.
fn destination(args: &HistoryGetArgs) -> PathBuf {
    args.out.clone().unwrap_or_else(|| {
        let name = args.key.rsplit('/').next().unwrap_or(&args.key);
        PathBuf::from(name)
    })
}
