//! Repository interfaces for data persistence
//!
//! These interfaces define the contracts for data access. Backends live in
//! `pagestore-persistence`; consumers depend only on the traits here.
//!
//! ## Contract
//!
//! - `find_by_id` reports absence as `Ok(None)`, never as an error
//! - `create` fails with `AlreadyExists` on an identifier collision
//! - `update` fails with `NotFound` when no record has that identifier
//! - `delete` returns whether a record was removed; a missing record is not an error
//!
//! A full CRUD repository is exactly the union of [`ReadRepository`] and
//! [`WriteRepository`]; see [`Repository`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::{entity::Entity, errors::RepositoryResult};

/// Read side of a repository
#[async_trait]
pub trait ReadRepository<E: Entity>: Send + Sync {
    /// Find a record by identifier
    async fn find_by_id(&self, id: &E::Id) -> RepositoryResult<Option<E>>;

    /// All records currently stored, in backend-defined order
    async fn find_all(&self) -> RepositoryResult<Vec<E>>;

    /// Check whether a record exists
    async fn exists(&self, id: &E::Id) -> RepositoryResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

/// Write side of a repository
#[async_trait]
pub trait WriteRepository<E: Entity>: Send + Sync {
    /// Persist a new record and return the stored value
    async fn create(&self, entity: E) -> RepositoryResult<E>;

    /// Replace an existing record and return the stored value
    async fn update(&self, entity: E) -> RepositoryResult<E>;

    /// Remove a record, returning `true` if one was removed
    async fn delete(&self, id: &E::Id) -> RepositoryResult<bool>;
}

/// Full CRUD capability: read plus write, nothing more
pub trait Repository<E: Entity>: ReadRepository<E> + WriteRepository<E> {}

impl<E, T> Repository<E> for T
where
    E: Entity,
    T: ReadRepository<E> + WriteRepository<E> + ?Sized,
{
}

/// Shared handles delegate to the repository they point at, so a
/// runtime-selected `Arc<dyn Repository<E>>` works wherever a generic
/// repository is expected.
#[async_trait]
impl<E, T> ReadRepository<E> for Arc<T>
where
    E: Entity,
    T: ReadRepository<E> + ?Sized,
{
    async fn find_by_id(&self, id: &E::Id) -> RepositoryResult<Option<E>> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> RepositoryResult<Vec<E>> {
        (**self).find_all().await
    }

    async fn exists(&self, id: &E::Id) -> RepositoryResult<bool> {
        (**self).exists(id).await
    }
}

#[async_trait]
impl<E, T> WriteRepository<E> for Arc<T>
where
    E: Entity,
    T: WriteRepository<E> + ?Sized,
{
    async fn create(&self, entity: E) -> RepositoryResult<E> {
        (**self).create(entity).await
    }

    async fn update(&self, entity: E) -> RepositoryResult<E> {
        (**self).update(entity).await
    }

    async fn delete(&self, id: &E::Id) -> RepositoryResult<bool> {
        (**self).delete(id).await
    }
}
