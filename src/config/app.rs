//! Application identity configuration.

use serde::Serialize;

/// Application-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// Application name used in logs.
    pub name: String,
    /// Release version, semver-like but not validated.
    pub version: String,
    /// Environment: "development", "staging", or "production".
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "configurable-service".to_string(),
            version: "1.0.0".to_string(),
            environment: "development".to_string(),
        }
    }
}
