//! Repository over a [`JsonFile`]

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pagestore_domain::{
    Entity, ReadRepository, RepositoryError, RepositoryResult, WriteRepository, WriteStamp,
};
use tracing::{debug, info};

use super::JsonFile;
use crate::collection::Collection;

/// File-backed repository storing one collection per JSON file
///
/// Records keep their insertion order on disk. Handles created for the same
/// directory do not share a lock; open one handle per collection and share
/// it.
#[derive(Debug, Clone)]
pub struct JsonFileRepository<E: Collection> {
    file: JsonFile,
    _marker: std::marker::PhantomData<fn() -> E>,
}

impl<E: Collection> JsonFileRepository<E> {
    /// Store the collection in `<data_dir>/<collection>.json`
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        let path = data_dir.as_ref().join(format!("{}.json", E::COLLECTION));
        info!(path = %path.display(), collection = E::COLLECTION, "Opened JSON collection");
        Self::at_path(path)
    }

    /// Store the collection in an explicit file
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
            _marker: std::marker::PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl<E: Collection> ReadRepository<E> for JsonFileRepository<E> {
    async fn find_by_id(&self, id: &E::Id) -> RepositoryResult<Option<E>> {
        let _guard = self.file.read_guard().await;
        let records: Vec<E> = self.file.load().await?;
        Ok(records.into_iter().find(|r| r.id() == id))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<E>> {
        let _guard = self.file.read_guard().await;
        Ok(self.file.load().await?)
    }
}

#[async_trait]
impl<E: Collection> WriteRepository<E> for JsonFileRepository<E> {
    async fn create(&self, mut entity: E) -> RepositoryResult<E> {
        let guard = self.file.write_guard().await;
        let mut records: Vec<E> = self.file.load().await?;

        if records.iter().any(|r| r.id() == entity.id()) {
            return Err(RepositoryError::already_exists::<E>(entity.id()));
        }

        WriteStamp::for_create().apply(&mut entity);
        records.push(entity.clone());
        self.file.store(records, guard).await?;

        debug!(id = %entity.id(), collection = E::COLLECTION, "Created record");
        Ok(entity)
    }

    async fn update(&self, mut entity: E) -> RepositoryResult<E> {
        let guard = self.file.write_guard().await;
        let mut records: Vec<E> = self.file.load().await?;

        let slot = records
            .iter_mut()
            .find(|r| r.id() == entity.id())
            .ok_or_else(|| RepositoryError::not_found::<E>(entity.id()))?;

        WriteStamp::for_update(slot.created_at()).apply(&mut entity);
        *slot = entity.clone();
        self.file.store(records, guard).await?;

        debug!(id = %entity.id(), collection = E::COLLECTION, "Updated record");
        Ok(entity)
    }

    async fn delete(&self, id: &E::Id) -> RepositoryResult<bool> {
        let guard = self.file.write_guard().await;
        let mut records: Vec<E> = self.file.load().await?;

        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }

        self.file.store(records, guard).await?;
        debug!(id = %id, collection = E::COLLECTION, "Deleted record");
        Ok(true)
    }
}
