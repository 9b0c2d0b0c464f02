//! Leaktrail Database Layer
//!
//! Provides `SQLite` persistence for the append-only findings record.
//! Uses `SQLx` with embedded, versioned migrations.
//!
//! # Architecture
//!
//! - **Migrations**: SQL migrations are embedded and versioned using `SQLx`
//! - **Connection Pooling**: Connection pool with a small fixed limit
//! - **Serialized appends**: All writes go through the single-writer
//!   [`store::FindingStore`] task, so concurrent scan events cannot lose
//!   findings to racing writers
//!
//! # Example
//!
//! ```ignore
//! use leaktrail_db::{Database, FindingStore};
//!
//! let db = Database::new("findings.db").await?;
//! db.run_migrations().await?;
//! let store = FindingStore::spawn(db.pool().clone());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod connection;
pub mod error;
pub mod findings;
pub mod migrations;
pub mod store;

// Re-export commonly used types
pub use error::{DatabaseError, Result};
pub use findings::FindingRecord;
pub use store::FindingStore;

use std::path::Path;

/// High-level database interface for the findings record.
///
/// Wraps the `SQLx` pool and handles initialization and migration.
#[derive(Debug)]
pub struct Database {
    pool: sqlx::Pool<sqlx::Sqlite>,
}

impl Database {
    /// Open the findings database at the specified path.
    ///
    /// The file is created if missing. Pass `:memory:` for an in-memory
    /// database.
    ///
    /// # Errors
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let pool = connection::open_pool(path).await?;
        Ok(Self { pool })
    }

    /// Run all pending database migrations.
    ///
    /// This should be called after creating a new database instance to ensure
    /// the schema is up to date.
    ///
    /// # Errors
    /// Returns `DatabaseError::Migration` if any migration fails.
    pub async fn run_migrations(&self) -> Result<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Get the current schema version.
    ///
    /// Returns the number of applied migrations.
    ///
    /// # Errors
    /// Returns `DatabaseError` if the version cannot be queried.
    pub async fn get_schema_version(&self) -> Result<i64> {
        migrations::get_schema_version(&self.pool).await
    }

    /// Get a reference to the underlying connection pool.
    ///
    /// This allows direct access to the `SQLx` pool for custom queries.
    #[must_use]
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Sqlite> {
        &self.pool
    }

    /// Close the database connection gracefully.
    ///
    /// This ensures all connections are properly closed and resources are
    /// cleaned up.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_creation() {
        let db = Database::new(":memory:").await.expect("create database");

        sqlx::query("SELECT 1")
            .execute(db.pool())
            .await
            .expect("execute query");
    }

    #[tokio::test]
    async fn test_database_migrations() {
        let db = Database::new(":memory:").await.expect("create database");

        let version_before = db.get_schema_version().await.expect("get version");
        assert_eq!(version_before, 0);

        db.run_migrations().await.expect("run migrations");

        let version_after = db.get_schema_version().await.expect("get version");
        assert_eq!(version_after, 1);
    }

    #[tokio::test]
    async fn test_database_schema() {
        let db = Database::new(":memory:").await.expect("create database");
        db.run_migrations().await.expect("run migrations");

        let finding_columns: Vec<String> =
            sqlx::query_scalar("SELECT name FROM pragma_table_info('findings') ORDER BY cid")
                .fetch_all(db.pool())
                .await
                .expect("query columns");

        assert_eq!(
            finding_columns,
            vec![
                "id",
                "source_kind",
                "origin_url",
                "source_value",
                "target_url",
                "detected_at"
            ]
        );
    }

    #[tokio::test]
    async fn test_database_close() {
        let db = Database::new(":memory:").await.expect("create database");
        db.close().await; // Should not panic
    }
}
