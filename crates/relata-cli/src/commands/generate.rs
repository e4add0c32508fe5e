use std::path::{Path, PathBuf};

use anyhow::Context;
use relata_core::{RenderedReport, ReportKey, ReportRequest, ReportSection, TabularDataset};
use relata_report::{ReportGenerator, TextModel};
use relata_store::ReportStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GenerateArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum UploadStatus {
    Uploaded,
    Skipped,
    Failed,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    key: String,
    upload: UploadStatus,
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upload_error: Option<String>,
    local_path: String,
    rows: usize,
    columns: usize,
    degraded: Vec<ReportSection>,
}

pub async fn handle(args: &GenerateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let dataset = relata_ingest::load_path(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let file_name = display_name(&args.file);

    let store = if args.no_upload {
        None
    } else {
        ctx.store.as_ref()
    };

    let response = generate_report(&ctx.generator, store, &dataset, &file_name, &args.out_dir).await?;

    if let Some(error) = &response.upload_error
        && !flags.quiet
    {
        eprintln!(
            "warning: upload failed, report kept at {}: {error}",
            response.local_path
        );
    }

    output(&response, flags.format)
}

/// Generate, upload when a store is given, and always write the local copy.
///
/// Only generation and the local write are fatal. An upload failure is
/// reported in the response.
async fn generate_report<M: TextModel>(
    generator: &ReportGenerator<M>,
    store: Option<&ReportStore>,
    dataset: &TabularDataset,
    file_name: &str,
    out_dir: &Path,
) -> anyhow::Result<GenerateResponse> {
    let progress = Progress::spinner("Generating report...");
    let generated = match generator.generate(&ReportRequest::new(dataset, file_name)).await {
        Ok(generated) => generated,
        Err(error) => {
            progress.finish_err("Report generation failed");
            return Err(error).context("failed to generate report");
        }
    };

    if generated.report.is_degraded() {
        tracing::warn!(
            sections = ?generated.report.degraded,
            "report uses placeholder text for missing sections"
        );
    }

    let key = ReportKey::now(file_name);

    let (upload, url, upload_error) = match store {
        None => (UploadStatus::Skipped, None, None),
        Some(store) => {
            progress.set_message("Uploading report...");
            match store.put(key.as_str(), &generated.html).await {
                Ok(url) => (UploadStatus::Uploaded, Some(url), None),
                Err(error) => {
                    tracing::warn!(%error, %key, "report upload failed");
                    (UploadStatus::Failed, None, Some(error.to_string()))
                }
            }
        }
    };
    progress.finish_clear();

    let local_path = write_local(out_dir, &key, &generated.html)?;
    tracing::info!(%key, path = %local_path.display(), "report written");

    Ok(GenerateResponse {
        key: key.into_string(),
        upload,
        url,
        upload_error,
        local_path: local_path.display().to_string(),
        rows: dataset.row_count(),
        columns: dataset.column_count(),
        degraded: generated.report.degraded,
    })
}

fn write_local(out_dir: &Path, key: &ReportKey, html: &RenderedReport) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let path = out_dir.join(key.as_str());
    std::fs::write(&path, html.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// File name shown in the report and used for the key.
fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use object_store::memory::InMemory;
    use pretty_assertions::assert_eq;
    use relata_core::CellValue;
    use relata_report::ModelError;

    use super::*;

    struct FixedModel(Result<&'static str, u16>);

    impl TextModel for FixedModel {
        async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(ModelError::Api {
                    status,
                    message: "boom".into(),
                }),
            }
        }
    }

    const FULL: &str = r#"{"titulo":"Horas","sumario_executivo":"<p>S</p>","analise_insights":"<p>I</p>","recomendacoes":"<p>R</p>"}"#;

    fn dataset() -> TabularDataset {
        TabularDataset::new(
            vec!["nome".into(), "horas".into()],
            vec![
                vec![CellValue::Text("Ana".into()), CellValue::Int(40)],
                vec![CellValue::Text("Bruno".into()), CellValue::Int(38)],
            ],
        )
        .expect("valid dataset")
    }

    #[tokio::test]
    async fn uploads_and_writes_identical_local_copy() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ReportStore::new(Arc::new(InMemory::new()), "https://bucket.example");
        let generator = ReportGenerator::new(FixedModel(Ok(FULL)));

        let response = generate_report(
            &generator,
            Some(&store),
            &dataset(),
            "Folha de Ponto.csv",
            dir.path(),
        )
        .await
        .expect("generate");

        assert_eq!(response.upload, UploadStatus::Uploaded);
        assert!(response.key.starts_with("folha_de_ponto_"));
        assert_eq!(
            response.url.as_deref(),
            Some(format!("https://bucket.example/{}", response.key).as_str())
        );
        assert_eq!((response.rows, response.columns), (2, 2));

        let local = std::fs::read_to_string(dir.path().join(&response.key)).expect("local copy");
        let stored = store.get(&response.key).await.expect("stored copy");
        assert_eq!(local, stored);
        assert!(local.contains("<p>I</p>"));
    }

    #[tokio::test]
    async fn without_store_upload_is_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let generator = ReportGenerator::new(FixedModel(Ok(r#"{"titulo":"Só título"}"#)));

        let response = generate_report(&generator, None, &dataset(), "a.csv", dir.path())
            .await
            .expect("generate");

        assert_eq!(response.upload, UploadStatus::Skipped);
        assert_eq!(response.url, None);
        assert_eq!(
            response.degraded,
            vec![
                ReportSection::ExecutiveSummary,
                ReportSection::Insights,
                ReportSection::Recommendations
            ]
        );
        assert!(dir.path().join(&response.key).exists());
    }

    #[tokio::test]
    async fn model_failure_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out_dir = dir.path().join("out");
        let generator = ReportGenerator::new(FixedModel(Err(500)));

        let result = generate_report(&generator, None, &dataset(), "a.csv", &out_dir).await;

        assert!(result.is_err());
        assert!(!out_dir.exists());
    }

    #[test]
    fn display_name_is_the_file_name() {
        assert_eq!(
            display_name(Path::new("/tmp/dados/Folha de Ponto.xlsx")),
            "Folha de Ponto.xlsx"
        );
    }
}
