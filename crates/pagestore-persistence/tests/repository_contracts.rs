//! Repository Contract Tests
//!
//! Runs the shared contract against every backend. A backend that passes is
//! substitutable for any other.

use std::sync::Arc;

use pagestore_domain::contract::{run_about_page_scenario, run_repository_contract};
use pagestore_domain::{PageContent, Repository, Route};
use pagestore_persistence::{InMemoryRepository, JsonFileRepository, Repositories};

// ============================================================================
// In-memory
// ============================================================================

#[tokio::test]
async fn memory_routes_satisfy_contract() {
    run_repository_contract::<Route, _>(&InMemoryRepository::<Route>::new()).await;
}

#[tokio::test]
async fn memory_content_satisfies_contract() {
    run_repository_contract::<PageContent, _>(&InMemoryRepository::<PageContent>::new()).await;
}

#[tokio::test]
async fn memory_about_page_scenario() {
    run_about_page_scenario(&InMemoryRepository::<Route>::new()).await;
}

// ============================================================================
// JSON files
// ============================================================================

#[tokio::test]
async fn json_routes_satisfy_contract() {
    let tmp = tempfile::tempdir().unwrap();
    run_repository_contract::<Route, _>(&JsonFileRepository::<Route>::open(tmp.path())).await;
}

#[tokio::test]
async fn json_content_satisfies_contract() {
    let tmp = tempfile::tempdir().unwrap();
    run_repository_contract::<PageContent, _>(&JsonFileRepository::<PageContent>::open(tmp.path()))
        .await;
}

#[tokio::test]
async fn json_about_page_scenario() {
    let tmp = tempfile::tempdir().unwrap();
    run_about_page_scenario(&JsonFileRepository::<Route>::open(tmp.path())).await;
}

// ============================================================================
// SQLite
// ============================================================================

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use pagestore_persistence::{SqlContentRepository, SqlDatabase, SqlRouteRepository};

    #[tokio::test]
    async fn routes_satisfy_contract() {
        let db = SqlDatabase::in_memory().await.unwrap();
        run_repository_contract::<Route, _>(&SqlRouteRepository::new(db)).await;
    }

    #[tokio::test]
    async fn content_satisfies_contract() {
        let db = SqlDatabase::in_memory().await.unwrap();
        run_repository_contract::<PageContent, _>(&SqlContentRepository::new(db)).await;
    }

    #[tokio::test]
    async fn file_database_satisfies_contract() {
        let tmp = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", tmp.path().join("pages.db").display());
        let db = SqlDatabase::connect(&url, 4).await.unwrap();

        run_repository_contract::<Route, _>(&SqlRouteRepository::new(db.clone())).await;
        run_repository_contract::<PageContent, _>(&SqlContentRepository::new(db)).await;
    }

    #[tokio::test]
    async fn about_page_scenario() {
        let db = SqlDatabase::in_memory().await.unwrap();
        run_about_page_scenario(&SqlRouteRepository::new(db)).await;
    }
}

// ============================================================================
// SurrealDB
// ============================================================================

#[cfg(feature = "surrealdb-backend")]
mod surreal {
    use super::*;
    use pagestore_persistence::surreal::{create_shared_connection, ConnectionMode};
    use pagestore_persistence::{SharedConnection, SurrealRepository};

    async fn connection() -> SharedConnection {
        create_shared_connection(ConnectionMode::Memory, "contract", "tests")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn schemaless_routes_satisfy_contract() {
        run_repository_contract::<Route, _>(&SurrealRepository::<Route>::new(connection().await))
            .await;
    }

    #[tokio::test]
    async fn schemaless_content_satisfies_contract() {
        let repo = SurrealRepository::<PageContent>::new(connection().await);
        run_repository_contract::<PageContent, _>(&repo).await;
    }

    #[tokio::test]
    async fn declared_schema_satisfies_contract() {
        let conn = connection().await;
        let routes = SurrealRepository::<Route>::with_schema(Arc::clone(&conn))
            .await
            .unwrap();
        let content = SurrealRepository::<PageContent>::with_schema(conn)
            .await
            .unwrap();

        run_repository_contract::<Route, _>(&routes).await;
        run_repository_contract::<PageContent, _>(&content).await;
    }

    #[tokio::test]
    async fn about_page_scenario() {
        run_about_page_scenario(&SurrealRepository::<Route>::new(connection().await)).await;
    }
}

// ============================================================================
// Through trait objects
// ============================================================================

#[tokio::test]
async fn trait_objects_satisfy_contract() {
    let repos = Repositories::in_memory();
    let routes: Arc<dyn Repository<Route>> = repos.routes;

    run_repository_contract::<Route, _>(routes.as_ref()).await;
    run_repository_contract::<PageContent, _>(&repos.content).await;
}
