//! The table of recognised configuration keys.
//!
//! Each entry pairs a dotted key with a typed setter on [`Config`], so the
//! file and environment layers never touch struct fields by name.

use super::Config;

/// Prefix for every configuration environment variable.
pub const ENV_PREFIX: &str = "MYAPP";

type Setter = fn(&mut Config, &str) -> Result<(), String>;

/// A recognised configuration key.
pub struct Field {
    /// Dotted key, e.g. `database.port`.
    pub key: &'static str,
    set: Setter,
}

impl Field {
    /// Parse `value` into this field's type and store it.
    pub fn apply(&self, config: &mut Config, value: &str) -> Result<(), String> {
        (self.set)(config, value)
    }

    /// Environment variable that overrides this field.
    pub fn env_var(&self) -> String {
        env_key(ENV_PREFIX, self.key)
    }
}

/// Every field of [`Config`], in report order.
pub static FIELDS: [Field; 10] = [
    Field {
        key: "app.name",
        set: |c, v| {
            c.app.name = v.to_string();
            Ok(())
        },
    },
    Field {
        key: "app.version",
        set: |c, v| {
            c.app.version = v.to_string();
            Ok(())
        },
    },
    Field {
        key: "app.environment",
        set: |c, v| {
            c.app.environment = v.to_string();
            Ok(())
        },
    },
    Field {
        key: "database.host",
        set: |c, v| {
            c.database.host = v.to_string();
            Ok(())
        },
    },
    Field {
        key: "database.port",
        set: |c, v| {
            c.database.port = v
                .trim()
                .parse()
                .map_err(|e| format!("invalid integer: {}", e))?;
            Ok(())
        },
    },
    Field {
        key: "database.username",
        set: |c, v| {
            c.database.username = v.to_string();
            Ok(())
        },
    },
    Field {
        key: "database.password",
        set: |c, v| {
            c.database.password = v.to_string();
            Ok(())
        },
    },
    Field {
        key: "database.database",
        set: |c, v| {
            c.database.database = v.to_string();
            Ok(())
        },
    },
    Field {
        key: "logging.level",
        set: |c, v| {
            c.logging.level = v.to_string();
            Ok(())
        },
    },
    Field {
        key: "logging.format",
        set: |c, v| {
            c.logging.format = v.to_string();
            Ok(())
        },
    },
];

/// Map a dotted key to its environment variable name.
///
/// `env_key("MYAPP", "app.name")` is `MYAPP_APP_NAME`.
pub fn env_key(prefix: &str, key: &str) -> String {
    format!("{}_{}", prefix, key.to_uppercase().replace('.', "_"))
}
