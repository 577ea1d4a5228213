use anyhow::Context;
use buddy_client::ApiError;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod ui;

/// Exit status when the stored session is missing, rejected or expired.
const EXIT_LOGIN_REQUIRED: i32 = 2;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("buddy error: {error:#}");
        std::process::exit(exit_code(&error));
    }
}

fn exit_code(error: &anyhow::Error) -> i32 {
    let login_required = error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<ApiError>())
        .any(ApiError::requires_login);
    if login_required { EXIT_LOGIN_REQUIRED } else { 1 }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = buddy_config::BuddyConfig::load_with_dotenv()
        .context("failed to load buddy configuration")?;
    let ctx = context::AppContext::init(config)
        .context("failed to initialize buddy client")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("BUDDY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
