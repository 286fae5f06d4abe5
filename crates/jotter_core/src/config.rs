//! Runtime configuration for composition roots.
//!
//! # Responsibility
//! - Resolve storage and logging locations from explicit values, environment
//!   variables and defaults, in that order.
//! - Hold crate-wide constants (storage key, alert duration).
//!
//! # Invariants
//! - Resolved `log_dir` is always absolute.
//! - Resolved `log_level` is one of `trace|debug|info|warn|error`.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Storage key holding the serialized note collection.
pub const NOTES_STORAGE_KEY: &str = "notes";
/// How long validation messages stay visible.
pub const ALERT_DISPLAY_DURATION: Duration = Duration::from_secs(3);

pub const DB_PATH_ENV: &str = "JOTTER_DB_PATH";
pub const LOG_DIR_ENV: &str = "JOTTER_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "JOTTER_LOG_LEVEL";

const DB_FILE_NAME: &str = "jotter.sqlite3";
const LOG_DIR_NAME: &str = "jotter-logs";

/// Configuration value rejected during resolution or preparation.
#[derive(Debug)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
    CreateDir { path: PathBuf, source: std::io::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::RelativeLogDir(path) => write!(
                f,
                "log_dir must be an absolute path, got `{}`",
                path.display()
            ),
            Self::CreateDir { path, source } => write!(
                f,
                "failed to create directory `{}`: {source}",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Explicit values that take precedence over environment and defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file backing the key-value store.
    pub db_path: PathBuf,
    /// Directory for rolling log files.
    pub log_dir: PathBuf,
    /// Normalized log level.
    pub log_level: &'static str,
}

impl CoreConfig {
    /// Resolves configuration from overrides and process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    /// Resolves configuration using `lookup` in place of the process environment.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let env_value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = overrides
            .db_path
            .or_else(|| env_value(DB_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DB_FILE_NAME));

        let log_dir = overrides
            .log_dir
            .or_else(|| env_value(LOG_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(LOG_DIR_NAME));
        if !log_dir.is_absolute() {
            return Err(ConfigError::RelativeLogDir(log_dir));
        }

        let log_level = match overrides.log_level.or_else(|| env_value(LOG_LEVEL_ENV)) {
            Some(raw) => normalize_level(&raw).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }

    /// Creates the parent directory of `db_path` when it does not exist yet.
    pub fn prepare_storage_dir(&self) -> Result<(), ConfigError> {
        match self.db_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => create_dir(parent),
            _ => Ok(()),
        }
    }
}

fn create_dir(path: &Path) -> Result<(), ConfigError> {
    std::fs::create_dir_all(path).map_err(|source| ConfigError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ConfigOverrides, CoreConfig, DB_PATH_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::path::PathBuf;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_land_in_temp_dir() {
        let config = CoreConfig::resolve_with(ConfigOverrides::default(), no_env).unwrap();
        assert!(config.db_path.starts_with(std::env::temp_dir()));
        assert!(config.log_dir.is_absolute());
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn overrides_win_over_environment() {
        let overrides = ConfigOverrides {
            db_path: Some(PathBuf::from("/srv/explicit.sqlite3")),
            log_dir: None,
            log_level: Some("WARNING".to_string()),
        };
        let config = CoreConfig::resolve_with(overrides, |name| match name {
            DB_PATH_ENV => Some("/srv/env.sqlite3".to_string()),
            LOG_LEVEL_ENV => Some("trace".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/srv/explicit.sqlite3"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let config = CoreConfig::resolve_with(ConfigOverrides::default(), |name| match name {
            DB_PATH_ENV => Some("   ".to_string()),
            _ => None,
        })
        .unwrap();
        assert!(config.db_path.starts_with(std::env::temp_dir()));
    }

    #[test]
    fn rejects_relative_log_dir_and_unknown_level() {
        let relative = ConfigOverrides {
            log_dir: Some(PathBuf::from("logs")),
            ..ConfigOverrides::default()
        };
        let err = CoreConfig::resolve_with(relative, no_env).unwrap_err();
        assert!(matches!(err, ConfigError::RelativeLogDir(_)));

        let verbose = ConfigOverrides {
            log_level: Some("verbose".to_string()),
            ..ConfigOverrides::default()
        };
        let err = CoreConfig::resolve_with(verbose, no_env).unwrap_err();
        assert!(err.to_string().contains("unsupported log level"));
    }
}
