// Command handlers

pub mod content;
pub mod init;
pub mod routes;

pub use content::{ContentAction, ContentCommand};
pub use init::InitCommand;
pub use routes::{RoutesAction, RoutesCommand};

use pagestore_persistence::Repositories;

use crate::error::CliResult;

/// A command run against the opened backend
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Run and return what should be printed
    async fn execute(&self, repos: &Repositories) -> CliResult<String>;
}
