use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = with_spinner("loading project", ctx.client.my_project()).await?;
    output(&project, flags.format)
}
