//! In-Memory Repository Implementation

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use pagestore_domain::{
    Entity, ReadRepository, RepositoryError, RepositoryResult, WriteRepository, WriteStamp,
};

/// Thread-safe in-memory repository for any entity type
///
/// Uses RwLock for concurrent read access with exclusive write access.
/// Stores cloned records to maintain isolation. `find_all` order is
/// unspecified.
///
/// # Example
///
/// ```ignore
/// use pagestore_persistence::memory::InMemoryRepository;
/// use pagestore_domain::{Repository, Route};
/// use std::sync::Arc;
///
/// let repo: Arc<dyn Repository<Route>> = Arc::new(InMemoryRepository::new());
/// ```
pub struct InMemoryRepository<E: Entity> {
    records: RwLock<HashMap<E::Id, E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    /// Create a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Create with initial records (useful for testing)
    pub fn with_records(records: Vec<E>) -> Self {
        let map: HashMap<E::Id, E> = records
            .into_iter()
            .map(|r| (r.id().clone(), r))
            .collect();
        Self {
            records: RwLock::new(map),
        }
    }

    /// Get the current count of records (for testing)
    pub fn count(&self) -> usize {
        self.records.read().len()
    }

    /// Clear all records (for testing)
    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> ReadRepository<E> for InMemoryRepository<E> {
    async fn find_by_id(&self, id: &E::Id) -> RepositoryResult<Option<E>> {
        let records = self.records.read();
        Ok(records.get(id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<E>> {
        let records = self.records.read();
        Ok(records.values().cloned().collect())
    }

    async fn exists(&self, id: &E::Id) -> RepositoryResult<bool> {
        let records = self.records.read();
        Ok(records.contains_key(id))
    }
}

#[async_trait]
impl<E: Entity> WriteRepository<E> for InMemoryRepository<E> {
    async fn create(&self, mut entity: E) -> RepositoryResult<E> {
        let mut records = self.records.write();
        if records.contains_key(entity.id()) {
            return Err(RepositoryError::already_exists::<E>(entity.id()));
        }
        WriteStamp::for_create().apply(&mut entity);
        records.insert(entity.id().clone(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, mut entity: E) -> RepositoryResult<E> {
        let mut records = self.records.write();
        let Some(existing) = records.get_mut(entity.id()) else {
            return Err(RepositoryError::not_found::<E>(entity.id()));
        };
        WriteStamp::for_update(existing.created_at()).apply(&mut entity);
        *existing = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: &E::Id) -> RepositoryResult<bool> {
        let mut records = self.records.write();
        Ok(records.remove(id).is_some())
    }
}
