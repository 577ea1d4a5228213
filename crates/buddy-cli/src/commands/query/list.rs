use buddy_core::QueryStatus;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::truncate;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

pub async fn run(status: Option<&str>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut queries = match status {
        Some(raw) => {
            let status = parse_enum::<QueryStatus>(raw, "status")?;
            with_spinner("loading queries", ctx.client.queries_by_status(status)).await?
        }
        None => with_spinner("loading queries", ctx.client.list_queries()).await?,
    };
    truncate(&mut queries, flags.limit, ctx.config.general.default_limit);

    output(&queries, flags.format)
}
