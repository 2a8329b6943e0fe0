//! Logging Infrastructure
//!
//! Structured logging setup for development and production environments.

use std::path::Path;

pub type LoggerInitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Initialize the logger with optional file output
///
/// When `log_dir` exists, output goes to a daily-rolling file
/// `reservation-server.YYYY-MM-DD` inside it instead of stdout.
///
/// Fails when a global subscriber is already installed; the existing one
/// stays in place.
pub fn init_logger_with_file(
    log_level: Option<&str>,
    log_dir: Option<&str>,
) -> Result<(), LoggerInitError> {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "reservation-server");
            return subscriber.with_writer(file_appender).try_init();
        }
    }

    subscriber.try_init()
}
