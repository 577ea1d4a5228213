use buddy_core::entities::{Project, ProjectUpdate};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::project::ProjectUpdateArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

pub async fn run(args: &ProjectUpdateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let current = with_spinner("loading project", ctx.client.my_project()).await?;
    let update = build_update(&current, args);

    let project = with_spinner(
        "updating project",
        ctx.client.update_project(current.id, &update),
    )
    .await?;
    output(&project, flags.format)
}

/// Overlay the flags on the current settings. Blank token flags keep the
/// stored token.
fn build_update(current: &Project, args: &ProjectUpdateArgs) -> ProjectUpdate {
    let mut update = ProjectUpdate::from_project(current)
        .with_test_it_token(args.test_it_token.clone())
        .with_jira_token(args.jira_token.clone());
    if let Some(id) = &args.test_it_project_id {
        update.test_it_project_id.clone_from(id);
    }
    if let Some(id) = &args.jira_project_id {
        update.jira_project_id.clone_from(id);
    }
    if let Some(context) = &args.context {
        update.project_context.clone_from(context);
    }
    update
}
