//! Routes command - list, inspect and edit routes

use pagestore_api::models::{CreateRouteRequest, UpdateRouteRequest};
use pagestore_api::RouteService;
use pagestore_persistence::Repositories;

use crate::commands::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutesAction {
    List,
    Get { path: String },
    Add { path: String, name: String, blocks: Vec<String> },
    Rename { path: String, name: String },
    Remove { path: String },
}

pub struct RoutesCommand {
    action: RoutesAction,
    style: OutputStyle,
}

impl RoutesCommand {
    pub fn new(action: RoutesAction) -> Self {
        Self {
            action,
            style: OutputStyle::default(),
        }
    }

    pub fn with_style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }
}

#[async_trait::async_trait]
impl Command for RoutesCommand {
    async fn execute(&self, repos: &Repositories) -> CliResult<String> {
        let service = RouteService::new(repos.routes.clone());

        match &self.action {
            RoutesAction::List => {
                let list = service.list().await?;
                if list.routes.is_empty() {
                    return Ok("No routes. Run 'pagestore init' to add the homepage.".to_string());
                }
                let mut lines: Vec<String> =
                    list.routes.iter().map(|r| self.style.route_line(r)).collect();
                lines.push(format!("{} route(s)", list.total));
                Ok(lines.join("\n"))
            }
            RoutesAction::Get { path } => {
                let route = service.get(path).await?;
                Ok(serde_json::to_string_pretty(&route)?)
            }
            RoutesAction::Add { path, name, blocks } => {
                let route = service
                    .create(CreateRouteRequest {
                        path: path.clone(),
                        name: name.clone(),
                        block_ids: blocks.clone(),
                    })
                    .await?;
                Ok(self.style.success(&format!("Added {}", self.style.route_line(&route))))
            }
            RoutesAction::Rename { path, name } => {
                let route = service
                    .update(
                        path,
                        UpdateRouteRequest {
                            name: Some(name.clone()),
                            block_ids: None,
                        },
                    )
                    .await?;
                Ok(self
                    .style
                    .success(&format!("Renamed {} to {}", route.path(), route.name())))
            }
            RoutesAction::Remove { path } => {
                service.delete(path).await?;
                Ok(self.style.success(&format!("Removed {path}")))
            }
        }
    }
}
