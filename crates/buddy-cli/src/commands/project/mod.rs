mod show;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::context::AppContext;

/// Handle `buddy project <subcommand>`.
pub async fn handle(action: &ProjectCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Show => show::run(ctx, flags).await,
        ProjectCommands::Update(args) => update::run(args, ctx, flags).await,
    }
}
