//! Snapshot of environment variables consumed during resolution.

use std::collections::HashMap;
use std::env;

/// An owned set of environment variables.
///
/// The resolver reads from a snapshot instead of the live process
/// environment, so overlays never leak back into the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Capture the current process environment. Non-UTF-8 entries are skipped.
    pub fn from_process() -> Self {
        Self {
            vars: env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    /// Value of `key`, if set to a non-empty string.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Add entries whose keys are not already present.
    pub fn merge_missing<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in entries {
            self.vars.entry(key).or_insert(value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
