use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

/// Environment variable holding the log level. Defaults to `info`.
pub const LOG_LEVEL_ENV: &str = "SPANMAZE_LOG";

/// Parse a level name, falling back to `info` for anything unrecognized.
pub fn parse_level(raw: Option<&str>) -> Level {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(Level::INFO)
}

/// Send logs to `log_file` through a background writer.
///
/// The terminal belongs to the UI, so nothing is logged without a file. The returned guard
/// flushes pending lines when dropped and must live until the program exits.
pub fn init(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let path = log_file?;
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name()?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let level = parse_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref());

    let installed = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .try_init();
    if installed.is_err() {
        // Another subscriber is already in place, keep using it
        return None;
    }
    tracing::info!("logging at level {} to {}", level, path.display());
    Some(guard)
}
