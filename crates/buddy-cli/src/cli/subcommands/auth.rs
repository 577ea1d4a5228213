use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in with username and password.
    Login(AuthLoginArgs),
    /// Clear stored credentials.
    Logout,
    /// Show locally stored credential status (no network).
    Status,
    /// Show the account behind the stored session.
    Whoami,
    /// Change the account password.
    ChangePassword(ChangePasswordArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long, short = 'u')]
    pub username: String,
    /// Password (falls back to BUDDY_PASSWORD, then a prompt).
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ChangePasswordArgs {
    #[arg(long)]
    pub old: Option<String>,
    #[arg(long)]
    pub new: Option<String>,
    #[arg(long)]
    pub confirm: Option<String>,
}
