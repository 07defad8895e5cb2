use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::LogLevel;

/// Logging defaults that can be loaded from a settings file and applied with
/// [`SilentTry::with_config`](crate::SilentTry::with_config).
///
/// ```rust
/// use silent_core::{LogLevel, SilentConfig};
///
/// let config: SilentConfig =
///     serde_json::from_str(r#"{ "log_level": "warning", "message": "sync" }"#).unwrap();
/// assert!(config.logable);
/// assert_eq!(config.log_level, LogLevel::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SilentConfig {
    pub logable: bool,
    pub log_level: LogLevel,
    pub message: String,
    pub data: Map<String, Value>,
    pub context: Map<String, Value>,
}

impl Default for SilentConfig {
    fn default() -> Self {
        Self {
            logable: true,
            log_level: LogLevel::Error,
            message: String::new(),
            data: Map::new(),
            context: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config: SilentConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SilentConfig::default());
    }

    #[test]
    fn rejects_unknown_level() {
        let err = serde_json::from_str::<SilentConfig>(r#"{ "log_level": "fatal" }"#).unwrap_err();
        assert!(err.to_string().contains("fatal"));
    }

    #[test]
    fn data_order_survives_deserialisation() {
        let config: SilentConfig =
            serde_json::from_str(r#"{ "data": { "b": 1, "a": 2 }, "logable": false }"#).unwrap();
        let keys: Vec<_> = config.data.keys().cloned().collect();
        assert_eq!(keys, ["b", "a"]);
        assert!(!config.logable);
    }
}
