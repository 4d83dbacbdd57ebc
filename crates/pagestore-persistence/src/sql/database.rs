//! SQLite pool and schema

use std::str::FromStr;

use pagestore_domain::StorageError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Executor;
use tracing::{debug, info};

use super::queries;
use crate::error::sqlx_error;

const CREATE_ROUTES: &str = r#"
CREATE TABLE IF NOT EXISTS routes (
    path TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    block_ids TEXT NOT NULL,
    created_at TEXT,
    updated_at TEXT
)
"#;

const CREATE_PAGE_CONTENT: &str = r#"
CREATE TABLE IF NOT EXISTS page_content (
    path TEXT PRIMARY KEY NOT NULL,
    blocks TEXT NOT NULL,
    created_at TEXT,
    updated_at TEXT
)
"#;

/// Shared connection pool with the schema in place
#[derive(Debug, Clone)]
pub struct SqlDatabase {
    pool: SqlitePool,
}

impl SqlDatabase {
    /// Connect to `url`, creating the database file if needed
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(sqlx_error)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(sqlx_error)?;

        info!(url = %url, max_connections, "Connected to SQLite");
        Self::from_pool(pool).await
    }

    /// Private in-memory database
    ///
    /// Every SQLite connection to `:memory:` gets its own database, so the
    /// pool is pinned to a single connection that never expires.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(sqlx_error)?;
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(sqlx_error)?;

        debug!("Opened in-memory SQLite database");
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, StorageError> {
        let db = Self { pool };
        db.ensure_schema().await?;
        db.check_statements(queries::ALL).await?;
        Ok(db)
    }

    /// Create the tables if they do not exist
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        for ddl in [CREATE_ROUTES, CREATE_PAGE_CONTENT] {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(sqlx_error)?;
        }
        Ok(())
    }

    /// Prepare each statement against the live schema without running it
    pub(crate) async fn check_statements(&self, statements: &[&str]) -> Result<(), StorageError> {
        for sql in statements {
            self.pool.prepare(sql).await.map_err(|e| {
                StorageError::Database(format!("statement does not match schema: {e}: {}", sql.trim()))
            })?;
        }
        debug!(count = statements.len(), "Checked SQL statements");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
