use clap::Subcommand;

/// Query commands.
#[derive(Clone, Debug, Subcommand)]
pub enum QueryCommands {
    /// List queries, optionally filtered by status.
    List {
        /// queued, in_progress, done or failed
        #[arg(long)]
        status: Option<String>,
    },
    /// Get a query by ID.
    Get { id: u64 },
    /// Submit a new query.
    Create {
        /// Task description.
        text: String,
        /// Project ID (defaults to the current user's project).
        #[arg(long)]
        project: Option<u64>,
    },
    /// Update a query.
    Update {
        id: u64,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        answer: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a finished query.
    Delete { id: u64 },
    /// Show a query's execution logs.
    Logs { id: u64 },
    /// Poll a query until it is done or failed.
    Watch {
        id: u64,
        /// Seconds between polls (defaults to poll.interval_secs).
        #[arg(long)]
        interval: Option<u64>,
    },
}
