use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the logging system with both console and file output.
pub fn init_logging() {
    // Ensure logs directory exists
    let _ = fs::create_dir_all("logs");

    // Non-blocking file appender with daily log rotation
    let file_appender = tracing_appender::rolling::daily("logs", "kamptrail.log");
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    // JSON layer for file logging, human-readable layer for the console.
    // Console logs go to stderr so report/progress output on stdout stays clean.
    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("kamptrail_scraper=info"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    // Keep the guard alive for the lifetime of the process so logs flush on exit
    std::mem::forget(guard);
}
