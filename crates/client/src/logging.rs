//! Tracing setup for the binary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `info`).
///
/// When `TOWER_LOG_DIR` is set, the same events are also written to
/// `tower.log` in that directory.
pub fn setup_logging() -> Result<()> {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let file_layer = match std::env::var_os("TOWER_LOG_DIR").map(PathBuf::from) {
        Some(log_dir) => {
            std::fs::create_dir_all(&log_dir).with_context(|| {
                format!("Failed to create log directory: {}", log_dir.display())
            })?;

            let file_appender = tracing_appender::rolling::never(&log_dir, "tower.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            // The writer thread must outlive every span; the process exits right after.
            std::mem::forget(guard);

            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking_file)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
