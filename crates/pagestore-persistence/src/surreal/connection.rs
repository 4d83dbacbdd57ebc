//! SurrealDB connection handling
//!
//! An embedded in-memory engine (`kv-mem`) for tests and local use, and a
//! WebSocket client (`protocol-ws`) for a running server. Both are wrapped in
//! [`DatabaseClient`] so repositories are written once.

use std::sync::Arc;

use pagestore_domain::StorageError;
use surrealdb::engine::local::{Db as LocalDb, Mem};
use surrealdb::engine::remote::ws::{Client as WsClient, Ws};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_NAMESPACE: &str = "pagestore";
pub const DEFAULT_DATABASE: &str = "main";

/// Where the documents live
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Embedded engine, gone when the process exits
    #[default]
    Memory,
    /// Server reached over WebSocket, signed in as a root user
    Remote {
        url: String,
        username: String,
        password: String,
    },
}

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Failed to connect to SurrealDB: {0}")]
    Connection(String),
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Namespace or database selection failed: {0}")]
    DatabaseSelection(String),
}

impl From<ConnectionError> for StorageError {
    fn from(err: ConnectionError) -> Self {
        StorageError::Connection(err.to_string())
    }
}

/// Embedded or remote client
pub enum DatabaseClient {
    Local(Surreal<LocalDb>),
    Remote(Surreal<WsClient>),
}

/// A client bound to one namespace and database
pub struct SurrealConnection {
    client: DatabaseClient,
    mode: ConnectionMode,
    namespace: String,
    database: String,
}

impl SurrealConnection {
    /// Connect using the default namespace and database
    pub async fn new(mode: ConnectionMode) -> Result<Self, ConnectionError> {
        Self::with_names(mode, DEFAULT_NAMESPACE, DEFAULT_DATABASE).await
    }

    pub async fn with_names(
        mode: ConnectionMode,
        namespace: &str,
        database: &str,
    ) -> Result<Self, ConnectionError> {
        let client = match &mode {
            ConnectionMode::Memory => {
                info!("Starting embedded SurrealDB");
                let db = Surreal::new::<Mem>(())
                    .await
                    .map_err(|e| ConnectionError::Connection(e.to_string()))?;
                DatabaseClient::Local(db)
            }
            ConnectionMode::Remote {
                url,
                username,
                password,
            } => {
                info!(url = %url, "Connecting to SurrealDB server");
                let db = Surreal::new::<Ws>(url.as_str())
                    .await
                    .map_err(|e| ConnectionError::Connection(e.to_string()))?;
                db.signin(Root {
                    username: username.as_str(),
                    password: password.as_str(),
                })
                .await
                .map_err(|e| ConnectionError::Authentication(e.to_string()))?;
                DatabaseClient::Remote(db)
            }
        };

        match &client {
            DatabaseClient::Local(db) => db.use_ns(namespace).use_db(database).await,
            DatabaseClient::Remote(db) => db.use_ns(namespace).use_db(database).await,
        }
        .map_err(|e| ConnectionError::DatabaseSelection(e.to_string()))?;

        debug!(namespace, database, "SurrealDB namespace selected");

        Ok(Self {
            client,
            mode,
            namespace: namespace.to_string(),
            database: database.to_string(),
        })
    }

    pub fn mode(&self) -> &ConnectionMode {
        &self.mode
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn client(&self) -> &DatabaseClient {
        &self.client
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.mode, ConnectionMode::Memory)
    }
}

/// Connection shared by every repository on the same database
pub type SharedConnection = Arc<SurrealConnection>;

pub async fn create_shared_connection(
    mode: ConnectionMode,
    namespace: &str,
    database: &str,
) -> Result<SharedConnection, ConnectionError> {
    Ok(Arc::new(
        SurrealConnection::with_names(mode, namespace, database).await?,
    ))
}
