use crate::cli::GlobalFlags;
use crate::cli::root_commands::LogArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

/// Handle `buddy log`.
pub async fn handle(args: &LogArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = match args.project {
        Some(id) => id,
        None => ctx.client.get_query(args.query).await?.project,
    };

    let log = with_spinner(
        "writing log",
        ctx.client.create_log(project, args.query, &args.data),
    )
    .await?;
    output(&log, flags.format)
}
