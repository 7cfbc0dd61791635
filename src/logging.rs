//! File-based logging setup for hosts embedding this crate
//!
//! Desktop-client extensions rarely own stdout, so logs go to a rotating
//! file. Hosts with their own tracing subscriber can skip this module
//! entirely; the crate only emits `tracing` events.

use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const LOG_FILE_PREFIX: &str = "playlist-index";

/// Initialize logging to `log_dir/playlist-index.YYYY-MM-DD.log` with daily
/// rotation. The level is controlled via `RUST_LOG`; without it, this crate
/// logs at DEBUG and everything else at WARN.
///
/// The returned guard flushes the non-blocking writer; keep it alive for
/// the life of the host process.
pub fn init_logging(log_dir: &Path) -> Result<WorkerGuard> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("playlist_index=debug,warn"));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!(dir = %log_dir.display(), "logging initialized");

    Ok(guard)
}
