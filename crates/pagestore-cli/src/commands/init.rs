//! Init command - seed the default route and homepage content

use pagestore_api::{ContentService, RouteService};
use pagestore_persistence::Repositories;
use tracing::info;

use crate::commands::Command;
use crate::error::CliResult;

pub struct InitCommand;

#[async_trait::async_trait]
impl Command for InitCommand {
    async fn execute(&self, repos: &Repositories) -> CliResult<String> {
        let routes = RouteService::new(repos.routes.clone());
        let content = ContentService::new(repos.content.clone(), repos.routes.clone());

        let seeded_routes = routes.ensure_defaults().await?;
        let seeded_content = content.ensure_defaults().await?;
        info!(seeded_routes, seeded_content, "Init finished");

        Ok(match (seeded_routes, seeded_content) {
            (0, false) => "Already initialized".to_string(),
            (n, true) => format!("Seeded {n} route(s) and the homepage content"),
            (n, false) => format!("Seeded {n} route(s)"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let repos = Repositories::in_memory();
        assert_eq!(
            InitCommand.execute(&repos).await.unwrap(),
            "Seeded 1 route(s) and the homepage content"
        );
        assert_eq!(InitCommand.execute(&repos).await.unwrap(), "Already initialized");
    }
}
