//! Database connection configuration.

use serde::Serialize;

/// Data-store connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseConfig {
    pub host: String,
    /// Expected in 1..=65535, not checked.
    pub port: i32,
    pub username: String,
    /// May be empty.
    pub password: String,
    /// Database name.
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: String::new(),
            database: "configurable_service".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Postgres-style key/value connection descriptor.
    pub fn dsn(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode=disable",
            self.host, self.port, self.username, self.password, self.database
        )
    }
}
