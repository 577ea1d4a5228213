use buddy_core::QueryStatus;
use buddy_core::entities::QueryPatch;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

pub async fn run(
    id: u64,
    text: Option<&str>,
    answer: Option<&str>,
    status: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let patch = QueryPatch {
        query_text: text.map(str::to_string),
        answer_text: answer.map(str::to_string),
        status: status
            .map(|raw| parse_enum::<QueryStatus>(raw, "status"))
            .transpose()?,
    };
    if patch.is_empty() {
        anyhow::bail!("query update: pass at least one of --text, --answer or --status");
    }

    let query = with_spinner("updating query", ctx.client.update_query(id, &patch)).await?;
    output(&query, flags.format)
}
