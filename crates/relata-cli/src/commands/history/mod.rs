pub mod get;
pub mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::HistoryCommands;
use crate::context::AppContext;

pub async fn handle(
    action: &HistoryCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        HistoryCommands::List => list::handle(ctx, flags).await,
        HistoryCommands::Get(args) => get::handle(args, ctx, flags).await,
    }
}
