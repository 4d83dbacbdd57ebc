//! Content command - show the blocks behind a route

use pagestore_api::ContentService;
use pagestore_persistence::Repositories;

use crate::commands::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentAction {
    Show { route: String },
}

pub struct ContentCommand {
    action: ContentAction,
    style: OutputStyle,
}

impl ContentCommand {
    pub fn new(action: ContentAction) -> Self {
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
impl Command for ContentCommand {
    async fn execute(&self, repos: &Repositories) -> CliResult<String> {
        let service = ContentService::new(repos.content.clone(), repos.routes.clone());

        match &self.action {
            ContentAction::Show { route } => {
                let page = service.load_for_route(route).await?;
                let mut lines = vec![format!("{} ({})", page.route, page.source)];
                if page.blocks.is_empty() {
                    lines.push("  no blocks".to_string());
                }
                lines.extend(
                    page.blocks
                        .iter()
                        .enumerate()
                        .map(|(i, block)| self.style.block_line(i, block)),
                );
                Ok(lines.join("\n"))
            }
        }
    }
}
