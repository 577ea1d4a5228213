use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

pub async fn run(
    text: &str,
    project: Option<u64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project = match project {
        Some(id) => id,
        None => ctx
            .client
            .me()
            .await?
            .project
            .context("your account has no project; pass --project")?,
    };

    let query = with_spinner("submitting query", ctx.client.create_query(project, text)).await?;
    if !flags.quiet {
        eprintln!("Submitted query {}; follow it with `buddy query watch {}`.", query.id, query.id);
    }
    output(&query, flags.format)
}
