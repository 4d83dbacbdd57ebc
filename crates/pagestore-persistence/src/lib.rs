//! PageStore Persistence Layer
//!
//! Storage backends implementing the repository contracts from
//! `pagestore-domain`. Every backend passes the same contract suite and is
//! reached through [`Repositories`], so callers can switch storage through
//! configuration alone.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Infrastructure Layer                     │
//! ├──────────────┬──────────────────┬─────────────┬──────────────┤
//! │  memory/     │  json/           │  sql/       │  surreal/    │
//! │  HashMap     │  one file per    │  SQLite     │  SurrealDB   │
//! │  per type    │  collection      │  tables     │  documents   │
//! └──────────────┴──────────────────┴─────────────┴──────────────┘
//!                               ▲
//!                               │ implements
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Domain Layer: ReadRepository, WriteRepository, Repository   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use pagestore_persistence::{Repositories, StoreConfig};
//!
//! let config = StoreConfig::load(Some("pagestore.toml".as_ref()))?;
//! let repos = Repositories::open(&config.backend).await?;
//! let routes = repos.routes.find_all().await?;
//! ```

pub mod backend;
pub mod collection;
pub mod config;
pub mod error;
pub mod json;
pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sql;

#[cfg(feature = "surrealdb-backend")]
pub mod surreal;

pub use backend::{ContentStore, Repositories, RouteStore};
pub use collection::{Collection, FieldSpec};
pub use config::{BackendConfig, ConfigLoader, StoreConfig, SurrealMode};
pub use error::PersistenceError;
pub use json::{JsonFile, JsonFileRepository};
pub use memory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sql::{SqlContentRepository, SqlDatabase, SqlRouteRepository};

#[cfg(feature = "surrealdb-backend")]
pub use surreal::{ConnectionMode, SharedConnection, SurrealConnection, SurrealRepository};
