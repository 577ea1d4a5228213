use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

#[derive(Serialize)]
struct DeleteResponse {
    id: u64,
    deleted: bool,
}

/// Fetch first so a queued or running query is refused before any DELETE.
pub async fn run(id: u64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let query = with_spinner("loading query", ctx.client.get_query(id)).await?;
    with_spinner("deleting query", ctx.client.delete_query(&query)).await?;
    output(&DeleteResponse { id, deleted: true }, flags.format)
}
