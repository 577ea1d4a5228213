use buddy_auth::{CredentialStore, TokenKey};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::commands::shared::secret;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

pub const PASSWORD_ENV: &str = "BUDDY_PASSWORD";

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user_id: u64,
    username: String,
    project: Option<u64>,
    project_name: Option<String>,
    first_login: bool,
    token_source: &'static str,
}

pub async fn handle(args: &AuthLoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let password = secret::resolve(args.password.as_deref(), Some(PASSWORD_ENV), "Password")?;
    if password.is_empty() {
        anyhow::bail!("auth login: password must not be empty");
    }

    let response = with_spinner("logging in", ctx.client.login(&args.username, &password)).await?;

    if response.first_login && !flags.quiet {
        eprintln!("First login: set a new password with `buddy auth change-password`.");
    }

    output(
        &AuthLoginResponse {
            authenticated: true,
            user_id: response.user.id,
            username: response.user.username,
            project: response.user.project,
            project_name: response.user.project_name,
            first_login: response.first_login,
            token_source: token_source(ctx.client.store()),
        },
        flags.format,
    )
}

/// Tier that holds the credentials, falling back to the configured backend.
pub(super) fn token_source(store: &dyn CredentialStore) -> &'static str {
    store
        .source_of(TokenKey::Access)
        .or_else(|| store.source_of(TokenKey::Refresh))
        .unwrap_or_else(|| store.source())
}
