use crate::error::Result;
use std::fs::OpenOptions;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Keeps the background log writer alive; pending lines are flushed on drop.
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// The terminal is in raw mode while the form runs, so logs only go to a
/// file. Without one, logging stays off. `RUST_LOG` wins over `level`.
pub fn init(log_file: Option<&Path>, level: &str) -> Result<Option<LogGuard>> {
    let Some(path) = log_file else {
        return Ok(None);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    tracing::debug!(path = %path.display(), "logging initialized");
    Ok(Some(LogGuard { _guard: guard }))
}
