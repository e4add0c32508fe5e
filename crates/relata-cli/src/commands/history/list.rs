use relata_store::ReportStore;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

const NO_BUCKET_NOTICE: &str =
    "History is unavailable: no bucket configured (set S3_BUCKET_NAME or RELATA_S3__BUCKET_NAME).";

#[derive(Debug, Serialize)]
struct ReportEntry {
    key: String,
    url: String,
}

#[derive(Debug, Serialize)]
struct ListResponse {
    reports: Vec<ReportEntry>,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
}

/// List stored reports. A missing bucket or a failed listing is reported as a
/// notice, never as an error.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = list_reports(ctx.store.as_ref()).await;

    if flags.format != OutputFormat::Table {
        return output(&response, flags.format);
    }

    if let Some(notice) = &response.notice {
        println!("{notice}");
        return Ok(());
    }
    if response.reports.is_empty() {
        println!("No reports stored yet.");
        return Ok(());
    }
    output(&response.reports, flags.format)
}

async fn list_reports(store: Option<&ReportStore>) -> ListResponse {
    let Some(store) = store else {
        return ListResponse::notice(NO_BUCKET_NOTICE.to_string());
    };

    match store.list().await {
        Ok(keys) => {
            let reports = keys
                .into_iter()
                .map(|key| ReportEntry {
                    url: store.url(&key),
                    key,
                })
                .collect::<Vec<_>>();
            ListResponse {
                count: reports.len(),
                reports,
                notice: None,
            }
        }
        Err(error) => {
            tracing::warn!(%error, "failed to list reports");
            ListResponse::notice(format!("Could not load report history: {error}"))
        }
    }
}

impl ListResponse {
    const fn notice(notice: String) -> Self {
        Self {
            reports: Vec::new(),
            count: 0,
            notice: Some(notice),
        }
    }
}
