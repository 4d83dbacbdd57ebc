//! Page content, addressed directly or through a route

use pagestore_domain::{
    Block, ContentPath, PageContent, Repository, RepositoryError, Route,
};
use tracing::{debug, info};

use super::RouteService;
use crate::error::{ApiError, ApiResult};
use crate::models::{PageResponse, SaveBlocksRequest};

#[derive(Debug, Clone)]
pub struct ContentService<C, R> {
    content: C,
    routes: RouteService<R>,
}

impl<C, R> ContentService<C, R>
where
    C: Repository<PageContent>,
    R: Repository<Route>,
{
    pub fn new(content: C, routes: R) -> Self {
        Self {
            content,
            routes: RouteService::new(routes),
        }
    }

    pub async fn get(&self, path: &str) -> ApiResult<PageContent> {
        let path = ContentPath::parse(path)?;
        self.content
            .find_by_id(&path)
            .await?
            .ok_or_else(|| RepositoryError::not_found::<PageContent>(&path).into())
    }

    /// Store `blocks` under `path`, creating the content if needed
    pub async fn save(&self, path: &str, blocks: Vec<Block>) -> ApiResult<PageContent> {
        let path = ContentPath::parse(path)?;
        self.upsert(PageContent::new(path, blocks)).await
    }

    async fn upsert(&self, content: PageContent) -> ApiResult<PageContent> {
        let saved = match self.content.update(content.clone()).await {
            Ok(saved) => saved,
            Err(RepositoryError::NotFound { .. }) => self.content.create(content).await?,
            Err(e) => return Err(e.into()),
        };
        debug!(path = %saved.path(), blocks = saved.blocks().len(), "Content saved");
        Ok(saved)
    }

    /// Blocks of the page behind a route name
    ///
    /// The route's first block id names the content. A route whose content
    /// has never been saved yields an empty page.
    pub async fn load_for_route(&self, name: &str) -> ApiResult<PageResponse> {
        let route = self.routes.find_by_name(name).await?;
        let path = primary_block(&route)?;

        let content = self
            .content
            .find_by_id(&path)
            .await?
            .unwrap_or_else(|| PageContent::new(path, Vec::new()));
        Ok(PageResponse::new(&route, content))
    }

    /// Replace the blocks of the page behind a route name
    pub async fn save_for_route(
        &self,
        name: &str,
        request: SaveBlocksRequest,
    ) -> ApiResult<PageResponse> {
        let route = self.routes.find_by_name(name).await?;
        let path = primary_block(&route)?;

        let saved = self.upsert(PageContent::new(path, request.blocks)).await?;
        info!(route = %route.name(), path = %saved.path(), "Page saved");
        Ok(PageResponse::new(&route, saved))
    }

    /// Seed the default homepage content if it is missing
    pub async fn ensure_defaults(&self) -> ApiResult<bool> {
        let homepage = PageContent::default_homepage();
        if self.content.exists(homepage.path()).await? {
            return Ok(false);
        }
        match self.content.create(homepage).await {
            Ok(_) => Ok(true),
            Err(RepositoryError::AlreadyExists { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn primary_block(route: &Route) -> ApiResult<ContentPath> {
    route
        .primary_block()
        .cloned()
        .ok_or_else(|| ApiError::bad_request(format!("route '{}' has no content", route.name())))
}
