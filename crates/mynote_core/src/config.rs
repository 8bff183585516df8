//! Runtime configuration resolved from the environment.
//!
//! | Variable           | Meaning                         | Default                        |
//! |--------------------|---------------------------------|--------------------------------|
//! | `MYNOTE_DB_PATH`   | note database file              | `<temp_dir>/mynote.sqlite3`    |
//! | `MYNOTE_LOG_LEVEL` | log level name (`trace`..`error`) | `default_log_level()`          |
//! | `MYNOTE_LOG_DIR`   | absolute log directory          | unset (file logging disabled)  |
//!
//! Blank values count as unset.

use crate::logging::{default_log_level, normalize_level};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "MYNOTE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "MYNOTE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "MYNOTE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "mynote.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads the process environment.
    ///
    /// # Errors
    /// Returns a message when `MYNOTE_LOG_LEVEL` names an unknown level.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, which maps a variable name
    /// to its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Ok(Self {
            db_path: read(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_level: match read(LOG_LEVEL_ENV) {
                Some(level) => normalize_level(&level)?,
                None => defaults.log_level,
            },
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            CoreConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "  "), (LOG_DIR_ENV, "")]))
                .expect("blank values are valid");
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, "/data/notes.db"),
            (LOG_LEVEL_ENV, "Warning"),
            (LOG_DIR_ENV, "/var/log/mynote"),
        ]))
        .expect("valid config");
        assert_eq!(config.db_path, PathBuf::from("/data/notes.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/mynote")));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let error = CoreConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "loud")]))
            .expect_err("unknown level must fail");
        assert!(error.contains("loud"));
    }
}
