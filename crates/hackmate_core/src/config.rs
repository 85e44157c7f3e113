//! Configuration loading for the core

use serde::Deserialize;
use std::path::Path;

use crate::db::DatabaseConfig;
use crate::error::{CoreError, Result};

/// Top-level configuration for the core
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl CoreConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| CoreError::ConfigurationError {
            config_path: path.display().to_string(),
            cause: Box::new(e),
        })?;
        Self::from_toml(&contents).map_err(|e| match e {
            CoreError::ConfigurationError { cause, .. } => CoreError::ConfigurationError {
                config_path: path.display().to_string(),
                cause,
            },
            other => other,
        })
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CoreError::ConfigurationError {
            config_path: "<inline>".to_string(),
            cause: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoreConfig::default();
        match config.database {
            DatabaseConfig::Embedded { path } => assert_eq!(path, "./hackmate.db"),
            #[cfg(feature = "surreal-remote")]
            _ => panic!("Expected embedded config"),
        }
    }

    #[test]
    fn test_parse_config() {
        let config = CoreConfig::from_toml(
            r#"
            [database]
            type = "embedded"
            path = "/var/lib/hackmate/data.db"
            "#,
        )
        .unwrap();

        match config.database {
            DatabaseConfig::Embedded { path } => {
                assert_eq!(path, "/var/lib/hackmate/data.db")
            }
            #[cfg(feature = "surreal-remote")]
            _ => panic!("Expected embedded config"),
        }
    }

    #[test]
    fn test_invalid_config() {
        assert!(CoreConfig::from_toml("database = 42").is_err());
    }
}
