//! Optional TOML configuration file.
//!
//! Every key is optional; command-line flags win over the file and the file
//! wins over built-in defaults.
//!
//! ```toml
//! backend = "sqlite"
//! db = "fx-calc.db"
//! log_level = "debug"
//! log_file = "fx-calc.log"
//! ```

use std::path::{Path, PathBuf};

use fx_core::db::DbConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::logging::DEFAULT_FILTER;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings from one source (file or command line). `None` means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FxConfig {
    pub backend: Option<String>,
    pub db: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl FxConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Field-wise merge: values set on `self` win, the rest come from `fallback`.
    pub fn or(
        self,
        fallback: FxConfig,
    ) -> FxConfig {
        FxConfig {
            backend: self.backend.or(fallback.backend),
            db: self.db.or(fallback.db),
            log_level: self.log_level.or(fallback.log_level),
            log_file: self.log_file.or(fallback.log_file),
        }
    }

    /// Storage settings, with unset keys taken from [`DbConfig::default`].
    pub fn db_config(&self) -> DbConfig {
        let defaults = DbConfig::default();
        DbConfig {
            backend: self.backend.clone().unwrap_or(defaults.backend),
            connection_string: self.db.clone().unwrap_or(defaults.connection_string),
        }
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = FxConfig::from_toml_str("").unwrap();

        assert_eq!(config, FxConfig::default());
        assert_eq!(
            config.db_config(),
            DbConfig {
                backend: "sqlite".to_string(),
                connection_string: "fx-calc.db".to_string(),
            }
        );
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn parses_all_keys() {
        let config = FxConfig::from_toml_str(
            r#"
            backend = "memory"
            db = "other.db"
            log_level = "debug"
            log_file = "fx.log"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.as_deref(), Some("memory"));
        assert_eq!(config.db.as_deref(), Some("other.db"));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_file, Some(PathBuf::from("fx.log")));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = FxConfig::from_toml_str("colour = \"blue\"");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn command_line_wins_over_file() {
        let cli = FxConfig {
            db: Some("cli.db".to_string()),
            ..Default::default()
        };
        let file = FxConfig {
            backend: Some("memory".to_string()),
            db: Some("file.db".to_string()),
            ..Default::default()
        };

        let merged = cli.or(file);

        assert_eq!(merged.db_config().backend, "memory");
        assert_eq!(merged.db_config().connection_string, "cli.db");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = FxConfig::load(Path::new("/nonexistent/fx-calc.toml")).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/fx-calc.toml"));
    }
}
