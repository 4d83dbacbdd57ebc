// CLI errors

use pagestore_api::ApiError;
use pagestore_persistence::PersistenceError;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Setup(#[from] PersistenceError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Message for the terminal; storage detail stays in the logs
    pub fn user_message(&self) -> String {
        match self {
            CliError::Setup(e) => format!("Could not open storage: {e}"),
            CliError::Api(e) => e.public_message(),
            CliError::Output(e) => format!("Could not render output: {e}"),
        }
    }

    /// Storage or serialization fault with no action for the user
    pub fn is_internal(&self) -> bool {
        matches!(self, CliError::Api(e) if e.is_internal())
    }

    /// Log the full error when it is internal, then return the terminal message
    pub fn report(&self) -> String {
        if self.is_internal() {
            error!(error = %self, "Command failed");
        }
        self.user_message()
    }
}

impl From<pagestore_domain::RepositoryError> for CliError {
    fn from(err: pagestore_domain::RepositoryError) -> Self {
        CliError::Api(err.into())
    }
}

pub type CliResult<T> = Result<T, CliError>;
