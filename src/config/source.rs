//! Structured config file discovery and parsing.

use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::ConfigError;

/// Name of the conventional config file.
pub const DEFAULT_FILE_NAME: &str = ".env";

/// Directories searched for the config file, relative to the root.
pub const DEFAULT_SEARCH_DIRS: [&str; 2] = [".", "configs"];

/// Syntax of a structured config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `key=value` lines with `#` comments.
    Env,
    /// Nested YAML mappings, flattened into dotted keys.
    Yaml,
}

impl ConfigFormat {
    /// Infer the format from a file extension; anything unknown is `Env`.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Env,
        }
    }
}

/// Where the structured config file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigFile {
    /// Look for `name` in each directory in order; absence is not an error.
    Search {
        name: String,
        format: ConfigFormat,
        dirs: Vec<PathBuf>,
    },
    /// Use exactly this file; absence is an error.
    Explicit { path: PathBuf, format: ConfigFormat },
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile::Search {
            name: DEFAULT_FILE_NAME.to_string(),
            format: ConfigFormat::Env,
            dirs: DEFAULT_SEARCH_DIRS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl ConfigFile {
    /// An explicit file whose format follows its extension.
    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = ConfigFormat::from_path(&path);
        ConfigFile::Explicit { path, format }
    }

    /// Resolve against `root` to the file that should be read, if any.
    pub fn locate(&self, root: &Path) -> Option<(PathBuf, ConfigFormat)> {
        match self {
            ConfigFile::Search { name, format, dirs } => dirs
                .iter()
                .map(|dir| {
                    if dir == Path::new(".") {
                        root.join(name)
                    } else {
                        root.join(dir).join(name)
                    }
                })
                .find(|path| path.is_file())
                .map(|path| (path, *format)),
            ConfigFile::Explicit { path, format } => Some((root.join(path), *format)),
        }
    }
}

/// Parsed contents of a structured config file, keyed by lower-case dotted key.
#[derive(Debug, Clone)]
pub struct FileOverlay {
    values: BTreeMap<String, Value>,
}

impl FileOverlay {
    /// Read and parse `path` as `format`.
    pub fn load(path: &Path, format: ConfigFormat) -> Result<Self, ConfigError> {
        let values = match format {
            ConfigFormat::Env => parse_env(path)?,
            ConfigFormat::Yaml => parse_yaml(path)?,
        };
        Ok(Self { values })
    }

    /// Text of the value stored under `key`.
    ///
    /// `Ok(None)` when absent. A sequence or mapping is returned as `Err`
    /// holding its YAML rendering.
    pub fn get(&self, key: &str) -> Result<Option<String>, String> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => scalar_text(value).map(Some).ok_or_else(|| render(value)),
        }
    }
}

fn parse_env(path: &Path) -> Result<BTreeMap<String, Value>, ConfigError> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| env_error(path, e))?;
    let mut values = BTreeMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| env_error(path, e))?;
        values.insert(key.to_lowercase(), Value::String(value));
    }
    Ok(values)
}

fn env_error(path: &Path, err: dotenvy::Error) -> ConfigError {
    match err {
        dotenvy::Error::Io(source) => ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        },
        source => ConfigError::ParseEnv {
            path: path.to_path_buf(),
            source,
        },
    }
}

fn parse_yaml(path: &Path) -> Result<BTreeMap<String, Value>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let yaml_error = |source| ConfigError::ParseYaml {
        path: path.to_path_buf(),
        source,
    };

    let root: Value = serde_yaml::from_str(&content).map_err(yaml_error)?;
    let mapping = match root {
        Value::Null => Mapping::new(),
        Value::Mapping(mapping) => mapping,
        // Re-deserialize to get serde_yaml's own type error.
        other => serde_yaml::from_value::<Mapping>(other).map_err(yaml_error)?,
    };

    let mut values = BTreeMap::new();
    flatten("", mapping, &mut values);
    Ok(values)
}

/// Flatten nested mappings into dotted keys. Null leaves are dropped.
///
/// Intermediate mappings are kept under their own key so a mapping where a
/// scalar is expected surfaces as a type error.
fn flatten(prefix: &str, mapping: Mapping, out: &mut BTreeMap<String, Value>) {
    for (key, value) in mapping {
        let Some(key) = scalar_text(&key) else {
            continue;
        };
        let key = if prefix.is_empty() {
            key.to_lowercase()
        } else {
            format!("{}.{}", prefix, key.to_lowercase())
        };

        match value {
            Value::Mapping(nested) => {
                out.insert(key.clone(), Value::Mapping(nested.clone()));
                flatten(&key, nested, out);
            }
            Value::Null => {}
            leaf => {
                out.insert(key, leaf);
            }
        }
    }
}

fn render(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().replace('\n', " "))
        .unwrap_or_default()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
