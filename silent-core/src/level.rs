use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity used when a caught fault is logged.
///
/// These are the eight syslog-style levels; `Error` is the default.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Notice,
    Warning,
    #[default]
    Error,
    Critical,
    Alert,
    Emergency,
}

impl LogLevel {
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Notice,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::Alert,
        LogLevel::Emergency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Notice => "notice",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
            LogLevel::Alert => "alert",
            LogLevel::Emergency => "emergency",
        }
    }

    /// Closest `tracing` level. `tracing` has no notice or anything above
    /// error, so those collapse onto info and error.
    pub fn tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info | LogLevel::Notice => tracing::Level::INFO,
            LogLevel::Warning => tracing::Level::WARN,
            LogLevel::Error | LogLevel::Critical | LogLevel::Alert | LogLevel::Emergency => {
                tracing::Level::ERROR
            }
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown log level `{0}` (expected debug, info, notice, warning, error, critical, alert or emergency)"
)]
pub struct ParseLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    /// Names are matched exactly; `"Error"` or `" error"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_error() {
        assert_eq!(LogLevel::default(), LogLevel::Error);
    }

    #[test]
    fn parses_every_name() {
        for level in LogLevel::ALL {
            assert_eq!(level.as_str().parse::<LogLevel>(), Ok(level));
        }
    }

    #[test]
    fn rejects_unknown_and_differently_cased_names() {
        assert!("fatal".parse::<LogLevel>().is_err());
        assert!("Error".parse::<LogLevel>().is_err());
        assert!("warn".parse::<LogLevel>().is_err());
        let err = "".parse::<LogLevel>().unwrap_err();
        assert!(err.to_string().contains("unknown log level"));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&LogLevel::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let level: LogLevel = serde_json::from_str("\"notice\"").unwrap();
        assert_eq!(level, LogLevel::Notice);
    }

    #[test]
    fn maps_onto_tracing_levels() {
        assert_eq!(LogLevel::Notice.tracing_level(), tracing::Level::INFO);
        assert_eq!(LogLevel::Emergency.tracing_level(), tracing::Level::ERROR);
        assert_eq!(LogLevel::Warning.tracing_level(), tracing::Level::WARN);
    }
}
