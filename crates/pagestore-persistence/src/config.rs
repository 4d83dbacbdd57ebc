//! Backend configuration
//!
//! Read from an optional TOML file, then overridden by environment variables
//! prefixed `PAGESTORE__`, with `__` separating nested keys:
//!
//! ```toml
//! log_level = "debug"
//!
//! [backend]
//! kind = "sqlite"
//! url = "sqlite://data/pages.db"
//! max_connections = 5
//! ```
//!
//! `PAGESTORE__BACKEND__KIND=json PAGESTORE__BACKEND__DATA_DIR=/srv/data`
//! selects the file backend regardless of the file.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

pub const ENV_PREFIX: &str = "PAGESTORE";

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: BackendConfig,
    /// Log level for binaries: `trace`, `debug`, `info`, `warn` or `error`
    pub log_level: Option<String>,
}

/// Which backend holds the records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Process memory, lost on exit
    Memory,
    /// One JSON file per collection
    Json {
        #[serde(default = "default_data_dir")]
        data_dir: PathBuf,
    },
    /// SQLite database
    Sqlite {
        url: String,
        #[serde(default = "default_max_connections")]
        max_connections: u32,
    },
    /// SurrealDB
    Surreal {
        #[serde(default)]
        mode: SurrealMode,
        #[serde(default = "default_namespace")]
        namespace: String,
        #[serde(default = "default_database")]
        database: String,
        /// Declare tables, field types and unique indexes on open
        #[serde(default)]
        declare_schema: bool,
    },
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Json {
            data_dir: default_data_dir(),
        }
    }
}

impl BackendConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Json { .. } => "json",
            Self::Sqlite { .. } => "sqlite",
            Self::Surreal { .. } => "surreal",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurrealMode {
    #[default]
    Memory,
    Remote {
        url: String,
        username: String,
        password: String,
    },
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_max_connections() -> u32 {
    5
}

fn default_namespace() -> String {
    "pagestore".to_string()
}

fn default_database() -> String {
    "main".to_string()
}

/// Assembles a [`StoreConfig`] from file and environment
#[derive(Debug, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    env: Option<Map<String, String>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read this TOML file if it exists
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Use these variables instead of the process environment
    pub fn with_env(mut self, vars: Map<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    pub fn load(self) -> Result<StoreConfig, PersistenceError> {
        let mut builder = Config::builder();
        if let Some(path) = &self.path {
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(self.env),
        );

        let config: StoreConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl StoreConfig {
    /// Load from `path` (optional) and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, PersistenceError> {
        let loader = ConfigLoader::new();
        match path {
            Some(path) => loader.with_file(path),
            None => loader,
        }
        .load()
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, PersistenceError> {
        let config: StoreConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PersistenceError> {
        match &self.backend {
            BackendConfig::Memory => {}
            BackendConfig::Json { data_dir } => {
                if data_dir.as_os_str().is_empty() {
                    return Err(PersistenceError::invalid_config("json data_dir is empty"));
                }
            }
            BackendConfig::Sqlite {
                url,
                max_connections,
            } => {
                if url.trim().is_empty() {
                    return Err(PersistenceError::invalid_config("sqlite url is empty"));
                }
                if *max_connections == 0 {
                    return Err(PersistenceError::invalid_config(
                        "sqlite max_connections must be at least 1",
                    ));
                }
            }
            BackendConfig::Surreal {
                mode,
                namespace,
                database,
                ..
            } => {
                if namespace.trim().is_empty() || database.trim().is_empty() {
                    return Err(PersistenceError::invalid_config(
                        "surreal namespace and database must not be empty",
                    ));
                }
                if let SurrealMode::Remote { url, .. } = mode {
                    if url.trim().is_empty() {
                        return Err(PersistenceError::invalid_config("surreal url is empty"));
                    }
                }
            }
        }
        Ok(())
    }
}
