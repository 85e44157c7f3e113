//! Direct SurrealDB client implementation

use crate::db::{DatabaseConfig, DatabaseError, Result};
use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};

const NAMESPACE: &str = "hackmate";
const DATABASE: &str = "hackmate";

/// Connect to the configured database, select the namespace, and bring the
/// schema up to date. Callers hold the returned handle for all operations.
pub async fn connect(config: &DatabaseConfig) -> Result<Surreal<Any>> {
    match config {
        DatabaseConfig::Embedded { path } => {
            let path = if path.is_empty() {
                "memory".to_string()
            } else {
                // Ensure parent directory exists for file-based storage
                if let Some(parent) = std::path::Path::new(&path).parent() {
                    if !parent.exists() {
                        std::fs::create_dir_all(parent).map_err(|e| {
                            DatabaseError::Other(format!(
                                "Failed to create database directory: {}",
                                e
                            ))
                        })?;
                    }
                }
                format!("surrealkv://{}", path)
            };

            tracing::info!("Connecting to embedded database at: {}", path);
            let db = any::connect(path)
                .await
                .map_err(DatabaseError::ConnectionFailed)?;

            // For embedded mode, we need to select a namespace and database
            db.use_ns(NAMESPACE)
                .use_db(DATABASE)
                .await
                .map_err(DatabaseError::ConnectionFailed)?;

            use crate::db::migration::MigrationRunner;
            MigrationRunner::run(&db).await?;

            Ok(db)
        }
        #[cfg(feature = "surreal-remote")]
        DatabaseConfig::Remote {
            url,
            username,
            password,
            namespace,
            database,
        } => {
            use surrealdb::opt::auth::Root;

            tracing::info!("Connecting to remote database at: {}", url);
            let db = any::connect(url)
                .await
                .map_err(DatabaseError::ConnectionFailed)?;

            // Authenticate if credentials provided
            if let (Some(user), Some(pass)) = (username, password) {
                db.signin(Root {
                    username: user,
                    password: pass,
                })
                .await
                .map_err(DatabaseError::ConnectionFailed)?;
            }

            db.use_ns(namespace)
                .use_db(database)
                .await
                .map_err(DatabaseError::ConnectionFailed)?;

            use crate::db::migration::MigrationRunner;
            MigrationRunner::run(&db).await?;

            Ok(db)
        }
    }
}

/// Create a new in-memory database instance for testing
pub async fn create_test_db() -> Result<Surreal<Any>> {
    let db = any::connect("memory")
        .await
        .map_err(DatabaseError::ConnectionFailed)?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(DatabaseError::ConnectionFailed)?;

    use crate::db::migration::MigrationRunner;
    MigrationRunner::run(&db).await?;
    Ok(db)
}

/// Check that a handle is healthy
pub async fn health_check(db: &Surreal<Any>) -> Result<()> {
    db.health().await.map_err(DatabaseError::ConnectionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory() {
        let db = create_test_db().await.unwrap();
        health_check(&db).await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_embedded_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("hackmate.db");
        let config = DatabaseConfig::Embedded {
            path: path.display().to_string(),
        };

        // Connecting creates the parent directory and runs migrations
        let db = connect(&config).await.unwrap();
        health_check(&db).await.unwrap();
        assert!(path.parent().unwrap().exists());
    }
}
