mod change_password;
mod login;
mod logout;
mod status;
mod whoami;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `buddy auth <subcommand>`.
pub async fn handle(action: &AuthCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, ctx, flags).await,
        AuthCommands::Logout => logout::handle(ctx, flags),
        AuthCommands::Status => status::handle(ctx, flags),
        AuthCommands::Whoami => whoami::handle(ctx, flags).await,
        AuthCommands::ChangePassword(args) => change_password::handle(args, ctx, flags).await,
    }
}
