//! Reporting of the resolved configuration.

use crate::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Target of the configuration report records.
pub const REPORT_TARGET: &str = module_path!();

/// Filter for `base` directives that still lets the report through at `info`.
pub fn report_filter(base: &str) -> EnvFilter {
    EnvFilter::new(format!("{},{}=info", base, REPORT_TARGET))
}

/// Holds the resolved configuration and reports it through tracing.
pub struct ConfigService {
    config: Config,
}

impl ConfigService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Emit one record per configuration group plus the derived DSN.
    pub fn display_config(&self) {
        let app = &self.config.app;
        let database = &self.config.database;
        let logging = &self.config.logging;

        info!("=== Configuration Service ===");
        info!(
            name = %app.name,
            version = %app.version,
            environment = %app.environment,
            "Application configuration"
        );
        info!(
            host = %database.host,
            port = database.port,
            username = %database.username,
            database = %database.database,
            dsn = %self.config.database_dsn(),
            "Database configuration"
        );
        info!(
            level = %logging.level,
            format = %logging.format,
            "Logging configuration"
        );
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::ConfigResolver;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Log sink shared between a subscriber and the test body.
    #[derive(Clone, Default)]
    pub(crate) struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_report(config: Config) -> String {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .finish();

        let service = ConfigService::new(config);
        tracing::subscriber::with_default(subscriber, || service.display_config());
        captured.contents()
    }

    #[test]
    fn test_display_config_reports_all_groups() {
        let output = capture_report(Config::default());

        assert!(output.contains("Application configuration"));
        assert!(output.contains("name=configurable-service"));
        assert!(output.contains("version=1.0.0"));
        assert!(output.contains("Database configuration"));
        assert!(output.contains("port=5432"));
        assert!(output.contains("Logging configuration"));
        assert!(output.contains("format=json"));
    }

    #[test]
    fn test_display_config_includes_dsn() {
        let mut config = Config::default();
        config.database.host = "db1".to_string();

        let output = capture_report(config);

        assert!(output.contains(
            "dsn=host=db1 port=5432 user=postgres password= dbname=configurable_service sslmode=disable"
        ));
    }

    #[test]
    fn test_report_survives_error_log_level() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ConfigResolver::new(
            dir.path(),
            [("MYAPP_LOGGING_LEVEL", "error")].into_iter().collect(),
        )
        .resolve()
        .unwrap();
        assert_eq!(config.logging.level, "error");

        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(report_filter(&config.logging.level))
            .with_writer(captured.clone())
            .with_ansi(false)
            .finish();
        let service = ConfigService::new(config);
        tracing::subscriber::with_default(subscriber, || {
            info!(target: "elsewhere", "filtered by level");
            service.display_config();
        });

        let output = captured.contents();
        assert!(output.contains("Application configuration"));
        assert!(output.contains("Database configuration"));
        assert!(output.contains("dsn=host=localhost port=5432"));
        assert!(output.contains("Logging configuration"));
        assert!(!output.contains("filtered by level"));
    }

    #[test]
    fn test_report_filter_keeps_warn_base_for_other_targets() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(report_filter("warn"))
            .with_writer(captured.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            info!(target: "elsewhere", "quiet");
            tracing::warn!(target: "elsewhere", "loud");
            ConfigService::new(Config::default()).display_config();
        });

        let output = captured.contents();
        assert!(!output.contains("quiet"));
        assert!(output.contains("loud"));
        assert!(output.contains("Application configuration"));
    }

    #[test]
    fn test_config_returns_held_value() {
        let mut config = Config::default();
        config.app.name = "svc".to_string();

        let service = ConfigService::new(config.clone());

        assert_eq!(service.config(), &config);
    }
}
