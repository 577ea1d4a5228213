use clap::Args;
use clap::Subcommand;

use crate::cli::subcommands::{AuthCommands, ProjectCommands, QueryCommands, UsageCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Log in, log out and manage the current account.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Submit, inspect and watch queries.
    Query {
        #[command(subcommand)]
        action: QueryCommands,
    },
    /// Append an execution log line to a query.
    Log(LogArgs),
    /// Show or edit the current user's project.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Model token usage.
    Usage {
        #[command(subcommand)]
        action: UsageCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct LogArgs {
    /// Query the log line belongs to.
    #[arg(long)]
    pub query: u64,
    /// Project ID (defaults to the query's project).
    #[arg(long)]
    pub project: Option<u64>,
    /// Log text.
    pub data: String,
}
