//! Document backend on SurrealDB
//!
//! ```ignore
//! use pagestore_persistence::surreal::{create_shared_connection, ConnectionMode, SurrealRepository};
//! use pagestore_domain::{PageContent, Route};
//! use std::sync::Arc;
//!
//! let conn = create_shared_connection(ConnectionMode::Memory, "pagestore", "main").await?;
//! let routes = SurrealRepository::<Route>::new(Arc::clone(&conn));
//! let content = SurrealRepository::<PageContent>::with_schema(conn).await?;
//! ```

/// Run `$body` with `$db` bound to whichever client the connection holds
macro_rules! with_db {
    ($conn:expr, |$db:ident| $body:expr) => {
        match $conn.client() {
            $crate::surreal::DatabaseClient::Local($db) => $body,
            $crate::surreal::DatabaseClient::Remote($db) => $body,
        }
    };
}

pub mod connection;
mod key;
mod repository;

pub use connection::{
    create_shared_connection, ConnectionError, ConnectionMode, DatabaseClient, SharedConnection,
    SurrealConnection, DEFAULT_DATABASE, DEFAULT_NAMESPACE,
};
pub use key::encode_key;
pub use repository::SurrealRepository;
