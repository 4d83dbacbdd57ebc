//! Persistence Layer Error Types
//!
//! Backend-native errors are converted to domain [`StorageError`]s here so
//! nothing from `sqlx`, `surrealdb` or `serde_json` leaks past this crate.

use pagestore_domain::StorageError;
use thiserror::Error;

/// Errors raised while configuring or opening a backend
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Configuration could not be read or deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration was read but is not usable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Backend was configured but not compiled in
    #[error("Backend '{0}' is not compiled in; rebuild with the '{1}' feature")]
    NotCompiled(&'static str, &'static str),

    /// Storage fault while opening the backend
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PersistenceError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Convert a JSON error on a named location to a corrupt-data fault
pub(crate) fn corrupt_json(location: impl Into<String>, err: serde_json::Error) -> StorageError {
    StorageError::corrupt(location, err.to_string())
}

/// Convert sqlx errors to storage faults
#[cfg(feature = "sqlite")]
pub(crate) fn sqlx_error(err: sqlx::Error) -> StorageError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StorageError::Connection(err.to_string())
        }
        sqlx::Error::Io(e) => StorageError::Connection(e.to_string()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StorageError::corrupt("database row", err.to_string())
        }
        other => StorageError::Database(other.to_string()),
    }
}

/// Convert SurrealDB errors to storage faults
#[cfg(feature = "surrealdb-backend")]
pub(crate) fn surreal_error(err: surrealdb::Error) -> StorageError {
    StorageError::Database(format!("SurrealDB: {}", err))
}
