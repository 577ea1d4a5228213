use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

pub async fn run(id: u64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let query = with_spinner("loading query", ctx.client.get_query(id)).await?;
    output(&query, flags.format)
}
