//! Route table access

use async_trait::async_trait;
use pagestore_domain::{
    ContentPath, Entity, ReadRepository, RepositoryError, RepositoryResult, Route, RouteName,
    RoutePath, StorageError, WriteRepository, WriteStamp,
};
use sqlx::{sqlite::SqliteRow, Row};
use tokio::sync::Mutex;
use tracing::debug;

use super::queries::routes::{DELETE, INSERT, SELECT_ALL, SELECT_CREATED_AT, SELECT_ONE, UPDATE};
use super::{format_timestamp, is_unique_violation, parse_timestamp, SqlDatabase};
use crate::error::sqlx_error;

const TABLE: &str = "routes";

/// Routes stored in the `routes` table
pub struct SqlRouteRepository {
    db: SqlDatabase,
    write_lock: Mutex<()>,
}

impl SqlRouteRepository {
    pub fn new(db: SqlDatabase) -> Self {
        Self {
            db,
            write_lock: Mutex::new(()),
        }
    }

    fn row_to_route(row: &SqliteRow) -> Result<Route, StorageError> {
        let path: String = row.try_get("path").map_err(sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlx_error)?;
        let block_ids: String = row.try_get("block_ids").map_err(sqlx_error)?;
        let created_at: Option<String> = row.try_get("created_at").map_err(sqlx_error)?;
        let updated_at: Option<String> = row.try_get("updated_at").map_err(sqlx_error)?;

        let path = RoutePath::parse(path).map_err(|e| StorageError::corrupt(TABLE, e.to_string()))?;
        let name = RouteName::parse(name).map_err(|e| StorageError::corrupt(TABLE, e.to_string()))?;
        let block_ids: Vec<ContentPath> = serde_json::from_str(&block_ids)
            .map_err(|e| StorageError::corrupt(TABLE, format!("block_ids of {path}: {e}")))?;

        let mut route = Route::new(path, name, block_ids);
        if let (Some(created), Some(updated)) = (created_at, updated_at) {
            route.stamp(
                parse_timestamp(TABLE, &created)?,
                parse_timestamp(TABLE, &updated)?,
            );
        }
        Ok(route)
    }

    fn encode_block_ids(route: &Route) -> Result<String, StorageError> {
        serde_json::to_string(route.block_ids())
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl ReadRepository<Route> for SqlRouteRepository {
    async fn find_by_id(&self, id: &RoutePath) -> RepositoryResult<Option<Route>> {
        let row = sqlx::query(SELECT_ONE)
            .bind(id.as_str())
            .fetch_optional(self.db.pool())
            .await
            .map_err(sqlx_error)?;

        match row {
            Some(row) => Ok(Some(Self::row_to_route(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Route>> {
        let rows = sqlx::query(SELECT_ALL)
            .fetch_all(self.db.pool())
            .await
            .map_err(sqlx_error)?;

        Ok(rows
            .iter()
            .map(Self::row_to_route)
            .collect::<Result<Vec<_>, _>>()?)
    }
}

#[async_trait]
impl WriteRepository<Route> for SqlRouteRepository {
    async fn create(&self, mut route: Route) -> RepositoryResult<Route> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.db.pool().begin().await.map_err(sqlx_error)?;

        let existing = sqlx::query(SELECT_CREATED_AT)
            .bind(route.path().as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(sqlx_error)?;
        if existing.is_some() {
            return Err(RepositoryError::already_exists::<Route>(route.path()));
        }

        let stamp = WriteStamp::for_create();
        stamp.apply(&mut route);

        let inserted = sqlx::query(INSERT)
            .bind(route.path().as_str())
            .bind(route.name().as_str())
            .bind(Self::encode_block_ids(&route)?)
            .bind(format_timestamp(stamp.created_at))
            .bind(format_timestamp(stamp.updated_at))
            .execute(&mut *tx)
            .await;
        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(RepositoryError::already_exists::<Route>(route.path()));
            }
            Err(e) => return Err(sqlx_error(e).into()),
        }

        tx.commit().await.map_err(sqlx_error)?;
        debug!(path = %route.path(), "Inserted route");
        Ok(route)
    }

    async fn update(&self, mut route: Route) -> RepositoryResult<Route> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.db.pool().begin().await.map_err(sqlx_error)?;

        let existing = sqlx::query(SELECT_CREATED_AT)
            .bind(route.path().as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(sqlx_error)?
            .ok_or_else(|| RepositoryError::not_found::<Route>(route.path()))?;
        let created_at: Option<String> = existing.try_get("created_at").map_err(sqlx_error)?;
        let created_at = created_at
            .map(|raw| parse_timestamp(TABLE, &raw))
            .transpose()?;

        let stamp = WriteStamp::for_update(created_at);
        stamp.apply(&mut route);

        let result = sqlx::query(UPDATE)
            .bind(route.name().as_str())
            .bind(Self::encode_block_ids(&route)?)
            .bind(format_timestamp(stamp.created_at))
            .bind(format_timestamp(stamp.updated_at))
            .bind(route.path().as_str())
            .execute(&mut *tx)
            .await
            .map_err(sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<Route>(route.path()));
        }

        tx.commit().await.map_err(sqlx_error)?;
        debug!(path = %route.path(), "Updated route");
        Ok(route)
    }

    async fn delete(&self, id: &RoutePath) -> RepositoryResult<bool> {
        let _guard = self.write_lock.lock().await;
        let result = sqlx::query(DELETE)
            .bind(id.as_str())
            .execute(self.db.pool())
            .await
            .map_err(sqlx_error)?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            debug!(path = %id, "Deleted route");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagestore_domain::default_routes;

    async fn repo() -> SqlRouteRepository {
        SqlRouteRepository::new(SqlDatabase::in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_round_trip_preserves_fields() {
        let repo = repo().await;
        let created = repo.create(Route::homepage()).await.unwrap();

        let found = repo.find_by_id(created.path()).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(
            found.block_ids()[0].as_str(),
            "data/content/homepage.json"
        );
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_path() {
        let repo = repo().await;
        for path in ["/zeta", "/alpha", "/"] {
            let route = Route::new(
                RoutePath::parse(path).unwrap(),
                RouteName::parse("Page").unwrap(),
                Vec::new(),
            );
            repo.create(route).await.unwrap();
        }

        let paths: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|r| r.path().to_string())
            .collect();
        assert_eq!(paths, vec!["/", "/alpha", "/zeta"]);
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = repo().await;
        let created = repo.create(default_routes().remove(0)).await.unwrap();
        let renamed = created.clone().with_name(RouteName::parse("Home").unwrap());

        let updated = repo.update(renamed).await.unwrap();
        assert_eq!(updated.created_at(), created.created_at());
        assert!(updated.updated_at() >= created.updated_at());
    }

    #[tokio::test]
    async fn test_invalid_stored_path_is_corrupt() {
        let repo = repo().await;
        sqlx::query(INSERT)
            .bind("no-leading-slash")
            .bind("Broken")
            .bind("[]")
            .bind(Option::<String>::None)
            .bind(Option::<String>::None)
            .execute(repo.db.pool())
            .await
            .unwrap();

        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Storage(StorageError::Corrupt { .. })));
    }
}
