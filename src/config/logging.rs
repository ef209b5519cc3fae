//! Logging configuration.

use serde::Serialize;

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggingConfig {
    /// Logging verbosity: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "json" or "text".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}
