use buddy_client::Session;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Validate the stored session against the server and print the user.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let progress = Progress::spinner("checking session");
    let session = ctx.client.restore_session().await;
    progress.finish_clear();

    match session {
        Session::Active(user) => output(&user, flags.format),
        Session::LoggedOut => anyhow::bail!("not logged in; run `buddy auth login`"),
    }
}
