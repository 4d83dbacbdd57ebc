//! Document repository over a SurrealDB table

use std::marker::PhantomData;

use async_trait::async_trait;
use pagestore_domain::{
    Entity, ReadRepository, RepositoryError, RepositoryResult, StorageError, WriteRepository,
    WriteStamp,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::connection::SharedConnection;
use super::key::encode_key;
use crate::collection::Collection;
use crate::error::surreal_error;

#[derive(Debug, Clone, Copy)]
enum UpdateMode {
    /// Overwrite the fields the entity carries, keep the rest
    Merge,
    Replace,
}

/// One collection stored as one table, one document per record
///
/// The record key is the encoded identifier. Entities carry no `id` field
/// of their own, so the `id` SurrealDB adds to each document is ignored
/// on read. `update` merges into the stored document; `replace` overwrites
/// it.
pub struct SurrealRepository<E: Collection> {
    connection: SharedConnection,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> E>,
}

impl<E: Collection> SurrealRepository<E> {
    /// Schemaless table, created on first write
    pub fn new(connection: SharedConnection) -> Self {
        Self {
            connection,
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// Declare the table, its field types and a unique index on the id field
    pub async fn with_schema(connection: SharedConnection) -> Result<Self, StorageError> {
        let repo = Self::new(connection);
        repo.declare_schema().await?;
        Ok(repo)
    }

    async fn declare_schema(&self) -> Result<(), StorageError> {
        let statements = schema_statements::<E>();
        with_db!(self.connection, |db| {
            db.query(statements.as_str())
                .await
                .and_then(|response| response.check())
                .map_err(surreal_error)?;
        });
        info!(table = E::COLLECTION, "Declared SurrealDB schema");
        Ok(())
    }

    /// Overwrite the stored document with `entity`
    ///
    /// Unlike [`update`](WriteRepository::update), fields present in the
    /// stored document but absent from `entity` are dropped. Creation time
    /// is still carried over.
    pub async fn replace(&self, entity: E) -> RepositoryResult<E> {
        self.write_existing(entity, UpdateMode::Replace).await
    }

    async fn write_existing(&self, mut entity: E, mode: UpdateMode) -> RepositoryResult<E> {
        let key = encode_key(&entity.id().to_string());
        let _guard = self.write_lock.lock().await;

        let existing = self
            .fetch(&key)
            .await?
            .ok_or_else(|| RepositoryError::not_found::<E>(entity.id()))?;

        WriteStamp::for_update(existing.created_at()).apply(&mut entity);
        let updated: Option<E> = with_db!(self.connection, |db| {
            let target = db.update((E::COLLECTION, key.as_str()));
            let written = match mode {
                UpdateMode::Merge => target.merge(entity.clone()).await,
                UpdateMode::Replace => target.content(entity.clone()).await,
            };
            written.map_err(surreal_error)?
        });

        debug!(table = E::COLLECTION, key = %key, ?mode, "Updated document");
        updated.ok_or_else(|| RepositoryError::not_found::<E>(entity.id()))
    }

    async fn fetch(&self, key: &str) -> Result<Option<E>, StorageError> {
        let record: Option<E> = with_db!(self.connection, |db| {
            db.select((E::COLLECTION, key)).await.map_err(surreal_error)?
        });
        Ok(record)
    }
}

pub(crate) fn schema_statements<E: Collection>() -> String {
    let table = E::COLLECTION;
    let mut sql = format!("DEFINE TABLE IF NOT EXISTS {table} SCHEMALESS;\n");
    for field in E::fields() {
        sql.push_str(&format!(
            "DEFINE FIELD IF NOT EXISTS {} ON TABLE {table} TYPE {};\n",
            field.name, field.kind
        ));
    }
    sql.push_str(&format!(
        "DEFINE INDEX IF NOT EXISTS {table}_{id}_unique ON TABLE {table} FIELDS {id} UNIQUE;\n",
        id = E::ID_FIELD
    ));
    sql
}

#[async_trait]
impl<E: Collection> ReadRepository<E> for SurrealRepository<E> {
    async fn find_by_id(&self, id: &E::Id) -> RepositoryResult<Option<E>> {
        Ok(self.fetch(&encode_key(&id.to_string())).await?)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<E>> {
        let records: Vec<E> = with_db!(self.connection, |db| {
            db.select(E::COLLECTION).await.map_err(surreal_error)?
        });
        Ok(records)
    }
}

#[async_trait]
impl<E: Collection> WriteRepository<E> for SurrealRepository<E> {
    async fn create(&self, mut entity: E) -> RepositoryResult<E> {
        let key = encode_key(&entity.id().to_string());
        let _guard = self.write_lock.lock().await;

        if self.fetch(&key).await?.is_some() {
            return Err(RepositoryError::already_exists::<E>(entity.id()));
        }

        WriteStamp::for_create().apply(&mut entity);
        let created: Option<E> = with_db!(self.connection, |db| {
            db.create((E::COLLECTION, key.as_str()))
                .content(entity.clone())
                .await
                .map_err(surreal_error)?
        });

        debug!(table = E::COLLECTION, key = %key, "Created document");
        created.ok_or_else(|| {
            StorageError::Database(format!("create of {key} returned no document")).into()
        })
    }

    async fn update(&self, entity: E) -> RepositoryResult<E> {
        self.write_existing(entity, UpdateMode::Merge).await
    }

    async fn delete(&self, id: &E::Id) -> RepositoryResult<bool> {
        let key = encode_key(&id.to_string());
        let _guard = self.write_lock.lock().await;

        let deleted: Option<E> = with_db!(self.connection, |db| {
            db.delete((E::COLLECTION, key.as_str()))
                .await
                .map_err(surreal_error)?
        });
        Ok(deleted.is_some())
    }
}
