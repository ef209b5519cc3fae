//! Layered configuration resolution.

use std::env;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::environment::Environment;
use super::fields::FIELDS;
use super::source::{ConfigFile, FileOverlay};
use super::{Config, ConfigError};

/// Name of the key-value file merged into the environment before resolution.
pub const DOTENV_FILE: &str = ".env";

/// Builds a [`Config`] from defaults, an optional config file and the environment.
///
/// Precedence, lowest first: [`Config::default`], the structured config
/// file, then `MYAPP_*` environment variables (including those supplied by
/// the root `.env` file).
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    root: PathBuf,
    env: Environment,
    file: ConfigFile,
}

impl ConfigResolver {
    pub fn new(root: impl Into<PathBuf>, env: Environment) -> Self {
        Self {
            root: root.into(),
            env,
            file: ConfigFile::default(),
        }
    }

    /// Resolver over the current working directory and process environment.
    pub fn from_process() -> Result<Self, ConfigError> {
        Ok(Self::new(env::current_dir()?, Environment::from_process()))
    }

    /// Replace the structured config file lookup.
    pub fn with_config_file(mut self, file: ConfigFile) -> Self {
        self.file = file;
        self
    }

    /// Resolve every field. No partial config is returned on error.
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        let env = self.environment_with_dotenv();
        let mut config = Config::default();

        if let Some(overlay) = self.load_config_file()? {
            for field in &FIELDS {
                let value = overlay
                    .get(field.key)
                    .map_err(|value| ConfigError::TypeMapping {
                        key: field.key,
                        value,
                        reason: "expected a scalar value".to_string(),
                    })?;
                if let Some(value) = value {
                    field
                        .apply(&mut config, &value)
                        .map_err(|reason| ConfigError::TypeMapping {
                            key: field.key,
                            value: value.clone(),
                            reason,
                        })?;
                }
            }
        }

        for field in &FIELDS {
            let var = field.env_var();
            if let Some(value) = env.get(&var) {
                if let Err(reason) = field.apply(&mut config, value) {
                    debug!(var = %var, reason = %reason, "Ignoring malformed environment override");
                }
            }
        }

        Ok(config)
    }

    /// Snapshot plus entries from the root `.env`, existing variables winning.
    fn environment_with_dotenv(&self) -> Environment {
        let mut env = self.env.clone();
        let path = self.root.join(DOTENV_FILE);

        let entries = dotenvy::from_path_iter(&path)
            .and_then(|iter| iter.collect::<Result<Vec<_>, _>>());
        match entries {
            Ok(entries) => {
                debug!(path = %path.display(), count = entries.len(), "Loaded .env file");
                env.merge_missing(entries);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "{}", dotenv_warning(&e));
            }
        }

        env
    }

    fn load_config_file(&self) -> Result<Option<FileOverlay>, ConfigError> {
        let Some((path, format)) = self.file.locate(&self.root) else {
            debug!(root = %self.root.display(), "No config file found, skipping");
            return Ok(None);
        };

        debug!(path = %path.display(), ?format, "Reading config file");
        FileOverlay::load(&path, format).map(Some)
    }
}

/// Log message for a `.env` file that could not be merged.
pub(crate) fn dotenv_warning(err: &dotenvy::Error) -> &'static str {
    if err.not_found() {
        "No .env file found, using environment variables only"
    } else {
        "Ignoring unreadable .env file, using environment variables only"
    }
}
