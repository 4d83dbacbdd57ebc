//! Opening the configured backend
//!
//! Every backend is reached through the same pair of trait objects, so the
//! rest of the application never learns which one is in use.

use std::sync::Arc;

use pagestore_domain::{PageContent, Repository, Route};
use tracing::info;

use crate::config::BackendConfig;
use crate::error::PersistenceError;
use crate::json::JsonFileRepository;
use crate::memory::InMemoryRepository;

pub type RouteStore = Arc<dyn Repository<Route>>;
pub type ContentStore = Arc<dyn Repository<PageContent>>;

/// Repository handles for every collection, opened once and shared
#[derive(Clone)]
pub struct Repositories {
    pub routes: RouteStore,
    pub content: ContentStore,
}

impl Repositories {
    /// Fresh in-memory repositories
    pub fn in_memory() -> Self {
        Self {
            routes: Arc::new(InMemoryRepository::<Route>::new()),
            content: Arc::new(InMemoryRepository::<PageContent>::new()),
        }
    }

    pub async fn open(config: &BackendConfig) -> Result<Self, PersistenceError> {
        let repos = match config {
            BackendConfig::Memory => Self::in_memory(),
            BackendConfig::Json { data_dir } => Self {
                routes: Arc::new(JsonFileRepository::<Route>::open(data_dir)),
                content: Arc::new(JsonFileRepository::<PageContent>::open(data_dir)),
            },
            BackendConfig::Sqlite {
                url,
                max_connections,
            } => open_sqlite(url, *max_connections).await?,
            BackendConfig::Surreal {
                mode,
                namespace,
                database,
                declare_schema,
            } => open_surreal(mode, namespace, database, *declare_schema).await?,
        };

        info!(backend = config.kind(), "Storage backend ready");
        Ok(repos)
    }
}

#[cfg(feature = "sqlite")]
async fn open_sqlite(url: &str, max_connections: u32) -> Result<Repositories, PersistenceError> {
    use crate::sql::{SqlContentRepository, SqlDatabase, SqlRouteRepository};

    let db = SqlDatabase::connect(url, max_connections).await?;
    Ok(Repositories {
        routes: Arc::new(SqlRouteRepository::new(db.clone())),
        content: Arc::new(SqlContentRepository::new(db)),
    })
}

#[cfg(not(feature = "sqlite"))]
async fn open_sqlite(_url: &str, _max_connections: u32) -> Result<Repositories, PersistenceError> {
    Err(PersistenceError::NotCompiled("sqlite", "sqlite"))
}

#[cfg(feature = "surrealdb-backend")]
async fn open_surreal(
    mode: &crate::config::SurrealMode,
    namespace: &str,
    database: &str,
    declare_schema: bool,
) -> Result<Repositories, PersistenceError> {
    use crate::config::SurrealMode;
    use crate::surreal::{create_shared_connection, ConnectionMode, SurrealRepository};
    use pagestore_domain::StorageError;

    let mode = match mode {
        SurrealMode::Memory => ConnectionMode::Memory,
        SurrealMode::Remote {
            url,
            username,
            password,
        } => ConnectionMode::Remote {
            url: url.clone(),
            username: username.clone(),
            password: password.clone(),
        },
    };
    let conn = create_shared_connection(mode, namespace, database)
        .await
        .map_err(StorageError::from)?;

    if declare_schema {
        Ok(Repositories {
            routes: Arc::new(SurrealRepository::<Route>::with_schema(Arc::clone(&conn)).await?),
            content: Arc::new(SurrealRepository::<PageContent>::with_schema(conn).await?),
        })
    } else {
        Ok(Repositories {
            routes: Arc::new(SurrealRepository::<Route>::new(Arc::clone(&conn))),
            content: Arc::new(SurrealRepository::<PageContent>::new(conn)),
        })
    }
}

#[cfg(not(feature = "surrealdb-backend"))]
async fn open_surreal(
    _mode: &crate::config::SurrealMode,
    _namespace: &str,
    _database: &str,
    _declare_schema: bool,
) -> Result<Repositories, PersistenceError> {
    Err(PersistenceError::NotCompiled("surreal", "surrealdb-backend"))
}
