use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::HistoryCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Load a CSV or spreadsheet and show its first rows.
    Preview(PreviewArgs),
    /// Generate an HTML report for a CSV or spreadsheet.
    Generate(GenerateArgs),
    /// Reports stored in the bucket.
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },
}

/// Arguments for `relata preview`.
#[derive(Clone, Debug, Args)]
pub struct PreviewArgs {
    /// Input file (.csv, or any spreadsheet format).
    pub file: PathBuf,
    /// Number of rows to show (defaults to general.preview_rows).
    #[arg(long)]
    pub rows: Option<usize>,
}

/// Arguments for `relata generate`.
#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    /// Input file (.csv, or any spreadsheet format).
    pub file: PathBuf,
    /// Directory for the local copy of the report.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
    /// Skip the bucket upload even when one is configured.
    #[arg(long)]
    pub no_upload: bool,
}
