use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Stored report commands.
#[derive(Clone, Debug, Subcommand)]
pub enum HistoryCommands {
    /// List stored reports, newest first.
    List,
    /// Download a stored report.
    Get(HistoryGetArgs),
}

#[derive(Clone, Debug, Args)]
pub struct HistoryGetArgs {
    /// Report key, as shown by `relata history list`.
    pub key: String,
    /// Destination file (defaults to ./{KEY}).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Print the HTML to stdout instead of writing a file.
    #[arg(long, conflicts_with = "out")]
    pub stdout: bool,
}
