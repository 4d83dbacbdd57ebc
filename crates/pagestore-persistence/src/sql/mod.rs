//! Relational backend on SQLite via `sqlx`
//!
//! Each entity type gets its own table with one column per field. List
//! valued fields are stored as JSON text. Timestamps are RFC 3339 text with
//! nanosecond precision so they survive a round trip unchanged.

mod content_repository;
mod database;
mod queries;
mod route_repository;

pub use content_repository::SqlContentRepository;
pub use database::SqlDatabase;
pub use route_repository::SqlRouteRepository;

use chrono::{DateTime, SecondsFormat, Utc};
use pagestore_domain::StorageError;

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_timestamp(table: &str, raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| StorageError::corrupt(table, format!("bad timestamp {raw:?}: {e}")))
}

/// True when the error is a primary key or unique constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
