use clap::Subcommand;

/// Token usage commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UsageCommands {
    /// List recorded model calls.
    List,
    /// Aggregated token statistics.
    Stats {
        /// Restrict to one query.
        #[arg(long)]
        query: Option<u64>,
    },
}
