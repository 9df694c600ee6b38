//! Host-supplied core configuration.
//!
//! # Invariants
//! - `log_level` is one of trace|debug|info|warn|error.
//! - `log_dir` and `preferences_path`, when set, are absolute paths.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub log_level: String,
    /// Logging stays disabled when absent.
    pub log_dir: Option<PathBuf>,
    /// In-memory preferences when absent.
    pub preferences_path: Option<PathBuf>,
    pub message_catalog: BTreeMap<String, String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            preferences_path: None,
            message_catalog: BTreeMap::new(),
        }
    }
}

impl CoreConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.log_level = config.log_level.trim().to_ascii_lowercase();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::UnsupportedLogLevel(self.log_level.clone()));
        }
        ensure_absolute("log_dir", self.log_dir.as_deref())?;
        ensure_absolute("preferences_path", self.preferences_path.as_deref())?;
        Ok(())
    }
}

fn ensure_absolute(field: &'static str, path: Option<&Path>) -> Result<(), ConfigError> {
    match path {
        Some(path) if !path.is_absolute() => Err(ConfigError::RelativePath {
            field,
            path: path.to_path_buf(),
        }),
        _ => Ok(()),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    UnsupportedLogLevel(String),
    RelativePath { field: &'static str, path: PathBuf },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::UnsupportedLogLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativePath { field, path } => write!(
                f,
                "{field} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig};

    #[test]
    fn empty_object_yields_defaults() {
        let config = CoreConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn level_is_normalized() {
        let config = CoreConfig::from_json_str(r#"{"log_level":" WARN "}"#).unwrap();
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn rejects_unknown_level_and_relative_paths() {
        let err = CoreConfig::from_json_str(r#"{"log_level":"loud"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedLogLevel(_)));

        let err = CoreConfig::from_json_str(r#"{"preferences_path":"prefs.sqlite3"}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RelativePath {
                field: "preferences_path",
                ..
            }
        ));
    }

    #[test]
    fn reads_message_catalog() {
        let config = CoreConfig::from_json_str(
            r#"{"message_catalog":{"REMOVE_SUCCESS":"{{type}} removed"}}"#,
        )
        .unwrap();
        assert_eq!(
            config.message_catalog.get("REMOVE_SUCCESS").map(String::as_str),
            Some("{{type}} removed")
        );
    }
}
