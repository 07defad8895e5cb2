//! Logging setup for the example using `tracing` + `tracing-subscriber`.
//!
//! The level comes from the `SILENT_LOG` environment variable
//! (e.g. "info", "debug") and defaults to `info`.

use tracing_subscriber::fmt;

/// Initialise the global logging subscriber. Call once at startup.
pub fn init_logging() {
    let level = std::env::var("SILENT_LOG")
        .ok()
        .and_then(|s| parse_level_str(&s))
        .unwrap_or(tracing::Level::INFO);

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
