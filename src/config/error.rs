//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration resolution error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("error reading config file {}: {source}", path.display())]
    ParseEnv {
        path: PathBuf,
        source: dotenvy::Error,
    },
    #[error("error reading config file {}: {source}", path.display())]
    ParseYaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("error unmarshaling config: {key}={value:?}: {reason}")]
    TypeMapping {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("failed to determine working directory: {0}")]
    WorkingDir(#[from] std::io::Error),
}
