use std::time::Duration;

use buddy_client::QuerySnapshot;
use buddy_core::entities::QueryLog;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Poll until the query finishes or the user presses Ctrl-C.
///
/// New log lines stream to stderr as they appear (except in JSON mode); the
/// final snapshot is printed in the requested format.
pub async fn run(
    id: u64,
    interval_secs: Option<u64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let interval = interval_secs.map_or_else(
        || ctx.config.poll.interval(),
        |secs| Duration::from_secs(secs.max(1)),
    );
    let stream_logs = flags.format != OutputFormat::Json && !flags.quiet;

    let progress = Progress::spinner(&format!("watching query {id}"));
    let mut shown = 0usize;
    let watch = ctx.client.watch(id).with_interval(interval).run(|snapshot| {
        progress.set_message(&format!("query {id}: {}", snapshot.query.status));
        if stream_logs {
            for line in new_log_lines(&snapshot.logs, &mut shown) {
                progress.println(&line);
            }
        }
    });

    let outcome = tokio::select! {
        result = watch => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(Ok(snapshot)) => {
            progress.finish_clear();
            render_final(&snapshot, flags)
        }
        Some(Err(error)) => {
            progress.finish_err(&format!("watching query {id} failed"));
            Err(error.into())
        }
        None => {
            progress.finish_err("cancelled");
            if !flags.quiet {
                eprintln!("Stopped watching query {id}.");
            }
            Ok(())
        }
    }
}

fn render_final(snapshot: &QuerySnapshot, flags: &GlobalFlags) -> anyhow::Result<()> {
    match flags.format {
        OutputFormat::Table => output(&snapshot.query, flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(snapshot, flags.format),
    }
}

/// Format logs past the `shown` watermark and advance it.
fn new_log_lines(logs: &[QueryLog], shown: &mut usize) -> Vec<String> {
    let lines = logs
        .iter()
        .skip(*shown)
        .map(|log| format!("[{}] {}", log.create_dtime.format("%H:%M:%S"), log.log_data.trim_end()))
        .collect::<Vec<_>>();
    *shown = (*shown).max(logs.len());
    lines
}
