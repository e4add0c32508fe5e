use anyhow::Context;
use relata_core::TabularDataset;
use serde::Serialize;

use crate::cli::root_commands::PreviewArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{output, table, table_options};

#[derive(Debug, Serialize)]
struct PreviewResponse<'a> {
    file: String,
    total_rows: usize,
    column_count: usize,
    preview: &'a TabularDataset,
}

pub fn handle(args: &PreviewArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let dataset = relata_ingest::load_path(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let rows = args.rows.unwrap_or(ctx.config.general.preview_rows);
    let head = dataset.head(rows);

    if flags.format == OutputFormat::Table {
        println!("{}", render_preview(&head, table_options()));
        if !flags.quiet {
            println!(
                "\n{} of {} rows, {} columns",
                head.row_count(),
                dataset.row_count(),
                dataset.column_count()
            );
        }
        return Ok(());
    }

    output(
        &PreviewResponse {
            file: args.file.display().to_string(),
            total_rows: dataset.row_count(),
            column_count: dataset.column_count(),
            preview: &head,
        },
        flags.format,
    )
}

/// Dataset rows as an aligned table, columns in source order.
fn render_preview(dataset: &TabularDataset, options: table::TableOptions) -> String {
    let headers = dataset
        .columns()
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>();
    let rows = dataset
        .iter_rows()
        .map(|row| row.cells().iter().map(ToString::to_string).collect())
        .collect::<Vec<Vec<String>>>();
    table::render_table(&headers, &rows, options)
}
