//! Database backend for Hackmate
//!
//! This module provides:
//! - Connectivity to embedded and remote SurrealDB engines
//! - Schema definitions and versioned migrations
//! - Storage-model wrappers and the operation extension trait

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

pub mod client;
pub mod migration;
pub mod models;
pub mod ops;
pub mod schema;

pub use models::{from_surreal_datetime, strip_brackets};
pub use ops::SurrealExt;

/// Core database error type
#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("Connection failed")]
    #[diagnostic(help("Check your database configuration and ensure the database is running"))]
    ConnectionFailed(#[source] surrealdb::Error),

    #[error("Query failed")]
    #[diagnostic(help("Check the query syntax and table schema"))]
    QueryFailed(#[source] surrealdb::Error),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Serialization error")]
    #[diagnostic(help("Failed to serialize/deserialize a database record"))]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Configuration for database backends
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DatabaseConfig {
    Embedded {
        #[serde(default = "default_db_path")]
        path: String,
    },
    #[cfg(feature = "surreal-remote")]
    Remote {
        url: String,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        password: Option<String>,
        namespace: String,
        database: String,
    },
}

fn default_db_path() -> String {
    "./hackmate.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig::Embedded {
            path: default_db_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        match config {
            DatabaseConfig::Embedded { path } => {
                assert_eq!(path, "./hackmate.db");
            }
            #[cfg(feature = "surreal-remote")]
            _ => panic!("Expected embedded config"),
        }
    }

    #[test]
    fn test_database_config_from_toml() {
        let config: DatabaseConfig = toml::from_str(
            r#"
            type = "embedded"
            path = "/tmp/test.db"
            "#,
        )
        .unwrap();

        match config {
            DatabaseConfig::Embedded { path } => assert_eq!(path, "/tmp/test.db"),
            #[cfg(feature = "surreal-remote")]
            _ => panic!("Expected embedded config"),
        }
    }
}
