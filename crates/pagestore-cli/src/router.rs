// Command line parsing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pagestore_persistence::{Repositories, StoreConfig};
use tracing::debug;

use crate::commands::{
    Command, ContentAction, ContentCommand, InitCommand, RoutesAction, RoutesCommand,
};
use crate::error::CliResult;

/// PageStore - manage site routes and page content
#[derive(Parser, Debug)]
#[command(name = "pagestore")]
#[command(bin_name = "pagestore")]
#[command(version)]
#[command(about = "Manage site routes and page content on any configured backend")]
pub struct Cli {
    /// Configuration file (TOML); PAGESTORE__* variables override it
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage routes
    Routes {
        #[command(subcommand)]
        action: RoutesSubcommand,
    },

    /// Inspect page content
    Content {
        #[command(subcommand)]
        action: ContentSubcommand,
    },

    /// Seed the default route and homepage content
    Init,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RoutesSubcommand {
    /// List all routes
    List,
    /// Show one route
    Get {
        #[arg(value_name = "PATH")]
        path: String,
    },
    /// Add a route
    Add {
        #[arg(value_name = "PATH")]
        path: String,
        #[arg(value_name = "NAME")]
        name: String,
        /// Content files, primary first
        #[arg(value_name = "BLOCK")]
        blocks: Vec<String>,
    },
    /// Change a route's name
    Rename {
        #[arg(value_name = "PATH")]
        path: String,
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Remove a route
    Remove {
        #[arg(value_name = "PATH")]
        path: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ContentSubcommand {
    /// Print the blocks of a route's page
    Show {
        #[arg(value_name = "ROUTE")]
        route: String,
    },
}

impl From<RoutesSubcommand> for RoutesAction {
    fn from(action: RoutesSubcommand) -> Self {
        match action {
            RoutesSubcommand::List => RoutesAction::List,
            RoutesSubcommand::Get { path } => RoutesAction::Get { path },
            RoutesSubcommand::Add { path, name, blocks } => RoutesAction::Add { path, name, blocks },
            RoutesSubcommand::Rename { path, name } => RoutesAction::Rename { path, name },
            RoutesSubcommand::Remove { path } => RoutesAction::Remove { path },
        }
    }
}

impl From<ContentSubcommand> for ContentAction {
    fn from(action: ContentSubcommand) -> Self {
        match action {
            ContentSubcommand::Show { route } => ContentAction::Show { route },
        }
    }
}

/// Routes parsed commands to their handlers
pub struct CommandRouter;

impl CommandRouter {
    /// Load configuration for the parsed command line
    pub fn load_config(cli: &Cli) -> CliResult<StoreConfig> {
        Ok(StoreConfig::load(cli.config.as_deref())?)
    }

    /// Open the backend once and run the command against it
    pub async fn execute(cli: Cli, config: &StoreConfig) -> CliResult<String> {
        let repos = Repositories::open(&config.backend).await?;
        debug!(backend = config.backend.kind(), "Dispatching command");
        Self::dispatch(cli.command, &repos).await
    }

    pub async fn dispatch(command: Commands, repos: &Repositories) -> CliResult<String> {
        match command {
            Commands::Routes { action } => RoutesCommand::new(action.into()).execute(repos).await,
            Commands::Content { action } => ContentCommand::new(action.into()).execute(repos).await,
            Commands::Init => InitCommand.execute(repos).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes_add() {
        let cli = Cli::try_parse_from([
            "pagestore",
            "routes",
            "add",
            "/about",
            "About Page",
            "data/content/about.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Routes {
                action: RoutesSubcommand::Add { path, name, blocks },
            } => {
                assert_eq!(path, "/about");
                assert_eq!(name, "About Page");
                assert_eq!(blocks, vec!["data/content/about.json"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pagestore",
            "init",
            "--config",
            "site.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("site.toml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["pagestore"]).is_err());
    }
}
