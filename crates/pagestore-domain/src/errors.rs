//! Storage and repository errors
//!
//! Two layers live here. [`StorageError`] describes faults of the storage
//! medium itself; [`RepositoryError`] adds the business outcomes every
//! backend must report identically and wraps storage faults unchanged.
//! The outward (transport-facing) layer lives in `pagestore-api`.

use std::path::PathBuf;

use thiserror::Error;

use crate::entity::Entity;

/// Faults of the underlying storage medium
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Corrupt data in {location}: {reason}")]
    Corrupt { location: String, reason: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl StorageError {
    /// Create an I/O error bound to the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a corrupt-data error
    pub fn corrupt(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

/// Errors returned by every repository operation
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("{entity_type} already exists: {id}")]
    AlreadyExists { entity_type: &'static str, id: String },

    #[error("{entity_type} {id} was modified concurrently")]
    ConcurrentModification { entity_type: &'static str, id: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// Not-found error for a record of type `E`
    pub fn not_found<E: Entity>(id: &E::Id) -> Self {
        Self::NotFound {
            entity_type: E::ENTITY_TYPE,
            id: id.to_string(),
        }
    }

    /// Identifier collision for a record of type `E`
    pub fn already_exists<E: Entity>(id: &E::Id) -> Self {
        Self::AlreadyExists {
            entity_type: E::ENTITY_TYPE,
            id: id.to_string(),
        }
    }

    /// Lost race against another writer on a record of type `E`
    pub fn concurrent_modification<E: Entity>(id: &E::Id) -> Self {
        Self::ConcurrentModification {
            entity_type: E::ENTITY_TYPE,
            id: id.to_string(),
        }
    }

    /// True for faults of the storage medium rather than business outcomes
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Serialization(_))
    }

    /// Identifier carried by a business outcome, if any
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::NotFound { id, .. }
            | Self::AlreadyExists { id, .. }
            | Self::ConcurrentModification { id, .. } => Some(id),
            Self::Storage(_) | Self::Serialization(_) => None,
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use crate::value_objects::RoutePath;

    #[test]
    fn test_not_found_carries_type_and_id() {
        let path = RoutePath::parse("/about").unwrap();
        let err = RepositoryError::not_found::<Route>(&path);
        assert_eq!(err.to_string(), "Route not found: /about");
        assert_eq!(err.id(), Some("/about"));
        assert!(!err.is_internal());
    }

    #[test]
    fn test_already_exists_message() {
        let path = RoutePath::parse("/about").unwrap();
        let err = RepositoryError::already_exists::<Route>(&path);
        assert!(matches!(
            err,
            RepositoryError::AlreadyExists { entity_type: "Route", ref id } if id == "/about"
        ));
    }

    #[test]
    fn test_storage_errors_are_internal() {
        let err: RepositoryError = StorageError::corrupt("routes.json", "trailing comma").into();
        assert!(err.is_internal());
        assert!(err.id().is_none());
        assert!(err.to_string().contains("routes.json"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err: RepositoryError = parse.into();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }
}
