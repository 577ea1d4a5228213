use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

pub async fn run(id: u64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let logs = with_spinner("loading logs", ctx.client.query_logs(id)).await?;
    output(&logs, flags.format)
}
