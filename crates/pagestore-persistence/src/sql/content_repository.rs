//! Page content table access

use async_trait::async_trait;
use pagestore_domain::{
    Block, ContentPath, Entity, PageContent, ReadRepository, RepositoryError, RepositoryResult,
    StorageError, WriteRepository, WriteStamp,
};
use tokio::sync::Mutex;
use tracing::debug;

use super::queries::content::{DELETE, INSERT, SELECT_ALL, SELECT_CREATED_AT, SELECT_ONE, UPDATE};
use super::{format_timestamp, is_unique_violation, parse_timestamp, SqlDatabase};
use crate::error::sqlx_error;

const TABLE: &str = "page_content";

#[derive(Debug, sqlx::FromRow)]
struct ContentRow {
    path: String,
    blocks: String,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl ContentRow {
    fn into_content(self) -> Result<PageContent, StorageError> {
        let path = ContentPath::parse(self.path)
            .map_err(|e| StorageError::corrupt(TABLE, e.to_string()))?;
        let blocks: Vec<Block> = serde_json::from_str(&self.blocks)
            .map_err(|e| StorageError::corrupt(TABLE, format!("blocks of {path}: {e}")))?;

        let mut content = PageContent::new(path, blocks);
        if let (Some(created), Some(updated)) = (self.created_at, self.updated_at) {
            content.stamp(
                parse_timestamp(TABLE, &created)?,
                parse_timestamp(TABLE, &updated)?,
            );
        }
        Ok(content)
    }
}

/// Page content stored in the `page_content` table
pub struct SqlContentRepository {
    db: SqlDatabase,
    write_lock: Mutex<()>,
}

impl SqlContentRepository {
    pub fn new(db: SqlDatabase) -> Self {
        Self {
            db,
            write_lock: Mutex::new(()),
        }
    }

    fn encode_blocks(content: &PageContent) -> Result<String, StorageError> {
        serde_json::to_string(content.blocks())
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl ReadRepository<PageContent> for SqlContentRepository {
    async fn find_by_id(&self, id: &ContentPath) -> RepositoryResult<Option<PageContent>> {
        let row: Option<ContentRow> = sqlx::query_as(SELECT_ONE)
            .bind(id.as_str())
            .fetch_optional(self.db.pool())
            .await
            .map_err(sqlx_error)?;

        Ok(row.map(ContentRow::into_content).transpose()?)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<PageContent>> {
        let rows: Vec<ContentRow> = sqlx::query_as(SELECT_ALL)
            .fetch_all(self.db.pool())
            .await
            .map_err(sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(ContentRow::into_content)
            .collect::<Result<Vec<_>, _>>()?)
    }
}

#[async_trait]
impl WriteRepository<PageContent> for SqlContentRepository {
    async fn create(&self, mut content: PageContent) -> RepositoryResult<PageContent> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.db.pool().begin().await.map_err(sqlx_error)?;

        let existing: Option<(Option<String>,)> = sqlx::query_as(SELECT_CREATED_AT)
            .bind(content.path().as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(sqlx_error)?;
        if existing.is_some() {
            return Err(RepositoryError::already_exists::<PageContent>(content.path()));
        }

        let stamp = WriteStamp::for_create();
        stamp.apply(&mut content);

        let inserted = sqlx::query(INSERT)
            .bind(content.path().as_str())
            .bind(Self::encode_blocks(&content)?)
            .bind(format_timestamp(stamp.created_at))
            .bind(format_timestamp(stamp.updated_at))
            .execute(&mut *tx)
            .await;
        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(RepositoryError::already_exists::<PageContent>(content.path()));
            }
            Err(e) => return Err(sqlx_error(e).into()),
        }

        tx.commit().await.map_err(sqlx_error)?;
        debug!(path = %content.path(), "Inserted page content");
        Ok(content)
    }

    async fn update(&self, mut content: PageContent) -> RepositoryResult<PageContent> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.db.pool().begin().await.map_err(sqlx_error)?;

        let existing: Option<(Option<String>,)> = sqlx::query_as(SELECT_CREATED_AT)
            .bind(content.path().as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(sqlx_error)?;
        let (created_at,) =
            existing.ok_or_else(|| RepositoryError::not_found::<PageContent>(content.path()))?;
        let created_at = created_at
            .map(|raw| parse_timestamp(TABLE, &raw))
            .transpose()?;

        let stamp = WriteStamp::for_update(created_at);
        stamp.apply(&mut content);

        let result = sqlx::query(UPDATE)
            .bind(Self::encode_blocks(&content)?)
            .bind(format_timestamp(stamp.created_at))
            .bind(format_timestamp(stamp.updated_at))
            .bind(content.path().as_str())
            .execute(&mut *tx)
            .await
            .map_err(sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<PageContent>(content.path()));
        }

        tx.commit().await.map_err(sqlx_error)?;
        debug!(path = %content.path(), "Updated page content");
        Ok(content)
    }

    async fn delete(&self, id: &ContentPath) -> RepositoryResult<bool> {
        let _guard = self.write_lock.lock().await;
        let result = sqlx::query(DELETE)
            .bind(id.as_str())
            .execute(self.db.pool())
            .await
            .map_err(sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }
}
