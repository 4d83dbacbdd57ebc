//! Route administration

use pagestore_domain::{
    default_routes, Entity, NewRoute, Repository, RepositoryError, Route, RouteChanges, RouteName,
    RoutePath,
};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::models::{CreateRouteRequest, RouteListResponse, UpdateRouteRequest};

#[derive(Debug, Clone)]
pub struct RouteService<R> {
    repo: R,
}

impl<R: Repository<Route>> RouteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// All routes ordered by path
    pub async fn list(&self) -> ApiResult<RouteListResponse> {
        let mut routes = self.repo.find_all().await?;
        routes.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(routes.into())
    }

    pub async fn get(&self, path: &str) -> ApiResult<Route> {
        let path = RoutePath::parse(path)?;
        self.repo
            .find_by_id(&path)
            .await?
            .ok_or_else(|| RepositoryError::not_found::<Route>(&path).into())
    }

    /// Look a route up by its admin name
    pub async fn find_by_name(&self, name: &str) -> ApiResult<Route> {
        let name = RouteName::parse(name)?;
        self.repo
            .find_all()
            .await?
            .into_iter()
            .find(|route| route.name() == &name)
            .ok_or_else(|| {
                RepositoryError::NotFound {
                    entity_type: Route::ENTITY_TYPE,
                    id: name.to_string(),
                }
                .into()
            })
    }

    pub async fn create(&self, request: CreateRouteRequest) -> ApiResult<Route> {
        let new_route = NewRoute::parse(request.path, request.name, request.block_ids)?;
        let route = self.repo.create(new_route.into_route()).await?;
        info!(path = %route.path(), name = %route.name(), "Route created");
        Ok(route)
    }

    pub async fn update(&self, path: &str, request: UpdateRouteRequest) -> ApiResult<Route> {
        let path = RoutePath::parse(path)?;
        let changes = RouteChanges::parse(request.name, request.block_ids)?;
        if changes.is_empty() {
            return Err(ApiError::bad_request("no changes supplied"));
        }

        let stored = self
            .repo
            .find_by_id(&path)
            .await?
            .ok_or_else(|| RepositoryError::not_found::<Route>(&path))?;
        let route = self.repo.update(changes.apply(stored)).await?;
        info!(path = %route.path(), "Route updated");
        Ok(route)
    }

    /// Remove a route; a missing route is reported as not found
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let path = RoutePath::parse(path)?;
        if !self.repo.delete(&path).await? {
            return Err(RepositoryError::not_found::<Route>(&path).into());
        }
        info!(path = %path, "Route deleted");
        Ok(())
    }

    /// Seed the default routes into an empty collection
    ///
    /// Returns how many routes were written. Does nothing once any route
    /// exists.
    pub async fn ensure_defaults(&self) -> ApiResult<usize> {
        if !self.repo.find_all().await?.is_empty() {
            debug!("Routes present, skipping defaults");
            return Ok(0);
        }

        let mut seeded = 0;
        for route in default_routes() {
            match self.repo.create(route).await {
                Ok(_) => seeded += 1,
                Err(RepositoryError::AlreadyExists { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }
        info!(seeded, "Default routes seeded");
        Ok(seeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use pagestore_persistence::InMemoryRepository;

    fn service() -> RouteService<InMemoryRepository<Route>> {
        RouteService::new(InMemoryRepository::new())
    }

    fn about_request() -> CreateRouteRequest {
        CreateRouteRequest {
            path: "/about".to_string(),
            name: "About Page".to_string(),
            block_ids: vec!["data/content/about.json".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        service.create(about_request()).await.unwrap();

        let route = service.get("/about").await.unwrap();
        assert_eq!(route.name().as_str(), "About Page");
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_repository() {
        let service = service();
        let mut request = about_request();
        request.path = "about".to_string();

        let err = service.create(request).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(service.repository().count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_create_is_conflict() {
        let service = service();
        service.create(about_request()).await.unwrap();

        let err = service.create(about_request()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let service = service();
        service.create(about_request()).await.unwrap();

        let updated = service
            .update(
                "/about",
                UpdateRouteRequest {
                    name: Some("About Us".to_string()),
                    block_ids: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name().as_str(), "About Us");
        assert_eq!(updated.block_ids()[0].as_str(), "data/content/about.json");
    }

    #[tokio::test]
    async fn test_empty_update_is_bad_request() {
        let service = service();
        service.create(about_request()).await.unwrap();

        let err = service
            .update("/about", UpdateRouteRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_update_of_missing_route_is_not_found() {
        let err = service()
            .update(
                "/missing",
                UpdateRouteRequest {
                    name: Some("Missing".to_string()),
                    block_ids: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = service();
        service.create(about_request()).await.unwrap();

        service.delete("/about").await.unwrap();
        let err = service.delete("/about").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let service = service();
        service.ensure_defaults().await.unwrap();

        assert_eq!(service.find_by_name("homepage").await.unwrap().path().as_str(), "/");
        let err = service.find_by_name("nope").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Repository(RepositoryError::NotFound { entity_type, ref id })
                if entity_type == Route::ENTITY_TYPE && id == "nope"
        ));
    }

    #[tokio::test]
    async fn test_defaults_seed_once() {
        let service = service();
        assert_eq!(service.ensure_defaults().await.unwrap(), 1);
        assert_eq!(service.ensure_defaults().await.unwrap(), 0);
        assert_eq!(service.list().await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_list_is_sorted() {
        let service = service();
        service.create(about_request()).await.unwrap();
        service.ensure_defaults().await.unwrap();
        service
            .create(CreateRouteRequest {
                path: "/blog".to_string(),
                name: "Blog".to_string(),
                block_ids: Vec::new(),
            })
            .await
            .unwrap();

        let paths: Vec<String> = service
            .list()
            .await
            .unwrap()
            .routes
            .iter()
            .map(|r| r.path().to_string())
            .collect();
        assert_eq!(paths, vec!["/about", "/blog"]);
    }
}
