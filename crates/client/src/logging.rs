//! File-only tracing setup. Stdout carries the game frames.
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Name of the log file created inside the log directory.
pub const LOG_FILE: &str = "dungeon.log";

/// Installs the global subscriber writing to `<log_dir>/dungeon.log`.
///
/// The filter comes from `RUST_LOG` with an `info` floor. Keep the returned
/// guard alive for the whole session or buffered lines are lost on exit.
pub fn setup_logging(log_dir: &Path) -> Result<(WorkerGuard, PathBuf)> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    let log_file = log_dir.join(LOG_FILE);
    tracing::info!("Log file: {}", log_file.display());
    Ok((guard, log_file))
}
