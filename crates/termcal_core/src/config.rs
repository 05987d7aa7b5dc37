//! Runtime configuration resolved from environment variables.

use crate::logging::{default_log_level, normalize_level};
use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Overrides the data directory (default `~/.termcal`).
pub const ENV_HOME: &str = "TERMCAL_HOME";
/// Log level: `trace|debug|info|warn|error`.
pub const ENV_LOG: &str = "TERMCAL_LOG";
/// Overrides the log directory (default `<data dir>/logs`).
pub const ENV_LOG_DIR: &str = "TERMCAL_LOG_DIR";
/// Any non-empty value disables colored output by default.
pub const ENV_NO_COLOR: &str = "NO_COLOR";

const DATA_DIR_NAME: &str = ".termcal";
const NOTES_FILE_NAME: &str = "notes.json";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither `TERMCAL_HOME` nor a home directory variable is set.
    MissingHome,
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHome => write!(
                f,
                "cannot locate home directory; set {ENV_HOME} to choose a data directory"
            ),
            Self::InvalidLogLevel(message) => write!(f, "{ENV_LOG}: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `notes.json`.
    pub data_dir: PathBuf,
    /// Directory receiving rotated log files.
    pub log_dir: PathBuf,
    /// Normalized log level.
    pub log_level: &'static str,
    /// `NO_COLOR` was set to a non-empty value.
    pub no_color: bool,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match non_empty(lookup(ENV_HOME)) {
            Some(dir) => PathBuf::from(dir),
            None => home_dir(&lookup)?.join(DATA_DIR_NAME),
        };

        let log_level = match non_empty(lookup(ENV_LOG)) {
            Some(level) => normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        let log_dir = non_empty(lookup(ENV_LOG_DIR))
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(LOG_DIR_NAME));

        Ok(Self {
            data_dir,
            log_dir,
            log_level,
            no_color: lookup(ENV_NO_COLOR).is_some_and(|value| !value.is_empty()),
        })
    }

    /// Configuration rooted at an explicit data directory.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            log_dir: data_dir.join(LOG_DIR_NAME),
            data_dir,
            log_level: default_log_level(),
            no_color: false,
        }
    }

    pub fn notes_path(&self) -> PathBuf {
        self.data_dir.join(NOTES_FILE_NAME)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn home_dir<F>(lookup: &F) -> Result<PathBuf, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    #[cfg(windows)]
    {
        if let Some(home) = non_empty(lookup("USERPROFILE")) {
            return Ok(PathBuf::from(home));
        }
    }

    non_empty(lookup("HOME"))
        .map(PathBuf::from)
        .ok_or(ConfigError::MissingHome)
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_hidden_dir_under_home() {
        let config = AppConfig::from_lookup(lookup(&[("HOME", "/home/ada")])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/home/ada/.termcal"));
        assert_eq!(
            config.notes_path(),
            PathBuf::from("/home/ada/.termcal/notes.json")
        );
        assert_eq!(config.log_dir, PathBuf::from("/home/ada/.termcal/logs"));
        assert!(!config.no_color);
    }

    #[test]
    fn explicit_variables_override_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TERMCAL_HOME", "/tmp/cal"),
            ("TERMCAL_LOG", "WARNING"),
            ("TERMCAL_LOG_DIR", "/var/log/cal"),
            ("NO_COLOR", "1"),
        ]))
        .unwrap();
        assert_eq!(config.notes_path(), PathBuf::from("/tmp/cal/notes.json"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, PathBuf::from("/var/log/cal"));
        assert!(config.no_color);
    }

    #[test]
    fn empty_no_color_keeps_color_enabled() {
        let config =
            AppConfig::from_lookup(lookup(&[("HOME", "/home/ada"), ("NO_COLOR", "")])).unwrap();
        assert!(!config.no_color);
    }

    #[test]
    fn missing_home_and_bad_level_are_reported() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::MissingHome
        );
        let err = AppConfig::from_lookup(lookup(&[("HOME", "/h"), ("TERMCAL_LOG", "loud")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }
}
