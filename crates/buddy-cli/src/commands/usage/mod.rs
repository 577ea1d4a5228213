use crate::cli::GlobalFlags;
use crate::cli::subcommands::UsageCommands;
use crate::commands::shared::limit::truncate;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

/// Handle `buddy usage <subcommand>`.
pub async fn handle(action: &UsageCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        UsageCommands::List => {
            let mut usage = with_spinner("loading token usage", ctx.client.token_usage()).await?;
            truncate(&mut usage, flags.limit, ctx.config.general.default_limit);
            output(&usage, flags.format)
        }
        UsageCommands::Stats { query } => {
            let stats = with_spinner(
                "loading usage statistics",
                ctx.client.token_usage_statistics(*query),
            )
            .await?;
            output(&stats, flags.format)
        }
    }
}
