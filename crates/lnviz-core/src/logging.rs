//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Result, ResultExt};

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/lnviz/logs/` so they never interleave
/// with the terminal UI. Log level is controlled by the `LNVIZ_LOG`
/// environment variable.
///
/// # Examples
/// ```bash
/// LNVIZ_LOG=debug lnviz
/// LNVIZ_LOG=lnviz_transport=trace lnviz
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir).context("creating log directory")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "lnviz.log");

    // Default to info, allow override via LNVIZ_LOG
    let env_filter =
        EnvFilter::try_from_env("LNVIZ_LOG").unwrap_or_else(|_| EnvFilter::new("lnviz=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("lnviz starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("lnviz").join("logs")
}
