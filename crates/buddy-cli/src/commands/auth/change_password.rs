use buddy_core::entities::PasswordChange;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::ChangePasswordArgs;
use crate::commands::shared::secret;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

#[derive(Serialize)]
struct ChangePasswordResponse {
    changed: bool,
}

pub async fn handle(args: &ChangePasswordArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let change = PasswordChange {
        old_password: secret::resolve(args.old.as_deref(), None, "Current password")?,
        new_password: secret::resolve(args.new.as_deref(), None, "New password")?,
        confirm_password: secret::resolve(args.confirm.as_deref(), None, "Confirm new password")?,
    };

    with_spinner("changing password", ctx.client.change_password(&change)).await?;
    output(&ChangePasswordResponse { changed: true }, flags.format)
}
