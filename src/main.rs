mod config;
mod service;

use config::{ConfigError, ConfigFile, ConfigResolver};
use service::ConfigService;
use std::env;
use std::process::ExitCode;
use tracing::{Level, Subscriber, error};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

/// Command-line options.
#[derive(Debug, Default)]
struct Args {
    /// Explicit config file, bypassing the search.
    config_path: Option<String>,
    /// Write the resolved config as YAML to stdout.
    print_config: bool,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    for arg in env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--config=") {
            args.config_path = Some(path.to_string());
        } else if arg == "--print-config" {
            args.print_config = true;
        }
    }
    args
}

fn parse_level(log_level: &str) -> Level {
    match log_level.to_ascii_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// `RUST_LOG` if set, otherwise `level`; the config report always passes.
fn env_filter(level: Level) -> EnvFilter {
    let base = env::var(EnvFilter::DEFAULT_ENV)
        .unwrap_or_else(|_| level.as_str().to_ascii_lowercase());
    service::report_filter(&base)
}

/// Plain-text subscriber used while the logging settings are still unknown.
fn bootstrap_subscriber<W>(writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt()
        .with_env_filter(env_filter(Level::INFO))
        .with_ansi(false)
        .with_writer(writer)
        .finish()
}

/// Install the global subscriber from the resolved logging settings.
fn init_tracing(logging: &config::LoggingConfig) {
    let filter = env_filter(parse_level(&logging.level));
    let builder = fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if logging.format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn resolve(args: &Args) -> Result<config::Config, ConfigError> {
    let mut resolver = ConfigResolver::from_process()?;
    if let Some(ref path) = args.config_path {
        resolver = resolver.with_config_file(ConfigFile::explicit(path));
    }
    resolver.resolve()
}

fn main() -> ExitCode {
    let args = parse_args();

    // Logging settings are part of the config, so resolution runs under a
    // temporary subscriber.
    let bootstrap = bootstrap_subscriber(std::io::stdout);
    let config = match tracing::subscriber::with_default(bootstrap, || {
        resolve(&args).inspect_err(|e| error!(error = %e, "Failed to load configuration"))
    }) {
        Ok(config) => config,
        Err(_) => return ExitCode::FAILURE,
    };

    init_tracing(&config.logging);

    let service = ConfigService::new(config);
    service.display_config();

    if args.print_config {
        match serde_yaml::to_string(service.config()) {
            Ok(yaml) => print!("{}", yaml),
            Err(e) => {
                error!(error = %e, "Failed to serialize configuration");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
