//! Layered configuration loading for the service.
//!
//! Values come from built-in defaults, an optional structured config file
//! (`.env` in the working directory or `configs/`), and `MYAPP_*`
//! environment variables, in increasing order of precedence. A `.env` file
//! in the working directory also feeds the environment layer.

mod app;
mod database;
mod environment;
mod error;
mod fields;
mod logging;
mod resolver;
mod source;

pub use error::ConfigError;
pub use logging::LoggingConfig;
pub use resolver::ConfigResolver;
pub use source::ConfigFile;

use app::AppConfig;
use database::DatabaseConfig;

use serde::Serialize;

/// Fully resolved service configuration.
///
/// Every field always carries a value; [`Default`] supplies the floor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Application identity.
    pub app: AppConfig,
    /// Data-store connection.
    pub database: DatabaseConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

impl Config {
    /// Connection descriptor derived from the database group.
    pub fn database_dsn(&self) -> String {
        self.database.dsn()
    }
}
