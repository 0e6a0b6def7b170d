//! Logging pipeline for one invocation.
//!
//! Emits one JSON object per line to stderr and to a log file. The file
//! writer is non-blocking; the returned guard flushes it when dropped, so
//! the pipeline's lifetime is scoped to the invocation that built it.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{Error, Result};

/// Installs the logging pipeline and returns the file writer's guard.
///
/// Default level is info, or debug when `debug` is set; `RUST_LOG`
/// overrides either.
pub fn init(debug: bool, log_file: &Path) -> Result<WorkerGuard> {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file = std::fs::File::create(log_file)
        .map_err(|e| Error::Config(format!("failed to create log file {}: {e}", log_file.display())))?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .with(fmt::layer().json().with_writer(file_writer))
        .init();

    Ok(guard)
}
