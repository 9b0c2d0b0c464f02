//! Database connection management.
//!
//! Provides `SQLite` connection pool setup for the findings database.

use crate::error::{DatabaseError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;

/// Open a `SQLite` connection pool at the given path.
///
/// The database file is created if it doesn't exist. Pass `:memory:` for an
/// in-memory database (used by tests).
///
/// # Errors
/// Returns `DatabaseError::Open` if the path is not valid UTF-8 or the
/// connection string cannot be parsed, and `DatabaseError::Sqlx` if the pool
/// cannot connect.
pub async fn open_pool(path: impl AsRef<Path>) -> Result<Pool<Sqlite>> {
    let path_str = path.as_ref().to_str().ok_or_else(|| {
        DatabaseError::Open("invalid database path: not valid UTF-8".to_string())
    })?;

    let connect_options = SqliteConnectOptions::from_str(path_str)
        .map_err(|e| DatabaseError::Open(format!("invalid connection string: {e}")))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    tracing::info!("Findings database pool created at {}", path_str);

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory_pool() {
        let pool = open_pool(":memory:").await.expect("open pool");

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .expect("execute query");
    }

    #[tokio::test]
    async fn test_open_file_pool_creates_database() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db_path = dir.path().join("findings.db");

        let pool = open_pool(&db_path).await.expect("open pool");
        pool.close().await;

        assert!(db_path.exists());
    }
}
