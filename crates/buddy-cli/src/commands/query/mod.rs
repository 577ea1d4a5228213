mod create;
mod delete;
mod get;
mod list;
mod logs;
mod update;
mod watch;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::QueryCommands;
use crate::context::AppContext;

/// Handle `buddy query <subcommand>`.
pub async fn handle(action: &QueryCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        QueryCommands::List { status } => list::run(status.as_deref(), ctx, flags).await,
        QueryCommands::Get { id } => get::run(*id, ctx, flags).await,
        QueryCommands::Create { text, project } => create::run(text, *project, ctx, flags).await,
        QueryCommands::Update {
            id,
            text,
            answer,
            status,
        } => {
            update::run(
                *id,
                text.as_deref(),
                answer.as_deref(),
                status.as_deref(),
                ctx,
                flags,
            )
            .await
        }
        QueryCommands::Delete { id } => delete::run(*id, ctx, flags).await,
        QueryCommands::Logs { id } => logs::run(*id, ctx, flags).await,
        QueryCommands::Watch { id, interval } => watch::run(*id, *interval, ctx, flags).await,
    }
}
