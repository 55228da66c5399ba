//! Server configuration loaded from environment variables
//!
//! | Env Var              | Default          |
//! |----------------------|------------------|
//! | `HOST`               | `0.0.0.0`        |
//! | `PORT`               | `3000`           |
//! | `STORAGE_BACKEND`    | `document`       |
//! | `MONGODB_URI`        | required (document) |
//! | `MONGODB_DATABASE`   | `catalog`        |
//! | `DB_HOST`            | `localhost`      |
//! | `DB_PORT`            | `3306`           |
//! | `DB_USER`            | required (relational) |
//! | `DB_PASSWORD`        | required (relational) |
//! | `DB_NAME`            | required (relational) |
//! | `DB_MAX_CONNECTIONS` | `5`              |
//! | `UPLOAD_DIR`         | `public/uploads` |
//! | `MAX_BODY_BYTES`     | `26214400`       |
//!
//! Nothing that grants access to a database has a default.

use catalog_core::{CatalogError, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;
use std::path::PathBuf;

/// A credential-bearing value that never shows up in `Debug` output
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationalConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Secret,
    pub database: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    Document { uri: Secret, database: String },
    Relational(RelationalConfig),
    Memory,
}

impl StorageConfig {
    pub fn backend(&self) -> &'static str {
        match self {
            StorageConfig::Document { .. } => "document",
            StorageConfig::Relational(_) => "relational",
            StorageConfig::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
    pub upload_dir: PathBuf,
    pub max_body_bytes: usize,
}

/// Flat view of the environment before validation
#[derive(Debug, Deserialize)]
struct RawConfig {
    host: String,
    port: u16,
    storage_backend: String,
    mongodb_uri: Option<String>,
    mongodb_database: String,
    db_host: String,
    db_port: u16,
    db_user: Option<String>,
    db_password: Option<String>,
    db_name: Option<String>,
    db_max_connections: u32,
    upload_dir: PathBuf,
    max_body_bytes: usize,
}

impl ServerConfig {
    /// Load from the process environment on top of the defaults
    pub fn from_env() -> Result<Self> {
        let source = defaults()
            .and_then(|builder| builder.add_source(Environment::default()).build())
            .map_err(config_error)?;
        Self::from_source(source)
    }

    /// Validate an already assembled configuration source
    pub fn from_source(source: Config) -> Result<Self> {
        let raw: RawConfig = source.try_deserialize().map_err(config_error)?;

        let storage = match raw.storage_backend.trim().to_ascii_lowercase().as_str() {
            "document" | "mongodb" => StorageConfig::Document {
                uri: Secret::new(require(raw.mongodb_uri, "MONGODB_URI")?),
                database: raw.mongodb_database,
            },
            "relational" | "mysql" => StorageConfig::Relational(RelationalConfig {
                host: raw.db_host,
                port: raw.db_port,
                user: require(raw.db_user, "DB_USER")?,
                password: Secret::new(require(raw.db_password, "DB_PASSWORD")?),
                database: require(raw.db_name, "DB_NAME")?,
                max_connections: raw.db_max_connections,
            }),
            "memory" => StorageConfig::Memory,
            other => {
                return Err(CatalogError::Config(format!(
                    "STORAGE_BACKEND must be one of document, relational, memory (got '{}')",
                    other
                )))
            }
        };

        Ok(Self {
            host: raw.host,
            port: raw.port,
            storage,
            upload_dir: raw.upload_dir,
            max_body_bytes: raw.max_body_bytes,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder pre-loaded with every non-secret default
pub fn defaults() -> std::result::Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("host", "0.0.0.0")?
        .set_default("port", 3000_i64)?
        .set_default("storage_backend", "document")?
        .set_default("mongodb_database", "catalog")?
        .set_default("db_host", "localhost")?
        .set_default("db_port", 3306_i64)?
        .set_default("db_max_connections", 5_i64)?
        .set_default("upload_dir", "public/uploads")?
        .set_default("max_body_bytes", 26_214_400_i64)
}

fn require(value: Option<String>, var: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CatalogError::Config(format!("{} must be set", var)))
}

fn config_error(e: ConfigError) -> CatalogError {
    CatalogError::Config(e.to_string())
}
