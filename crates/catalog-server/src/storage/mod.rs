//! Storage layer
//!
//! One `ProductStore` per deployment: MongoDB (document), MySQL (relational),
//! or a DashMap for local runs.

pub mod document;
pub mod memory;
pub mod relational;

pub use document::DocumentStore;
pub use memory::MemoryStore;
pub use relational::RelationalStore;

use crate::config::StorageConfig;
use catalog_core::{ProductStore, Result};
use std::sync::Arc;
use tracing::info;

/// Open the configured backend and prove it answers before returning it
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn ProductStore>> {
    info!("Initializing {} storage backend...", config.backend());

    let store: Arc<dyn ProductStore> = match config {
        StorageConfig::Document { uri, database } => {
            Arc::new(DocumentStore::connect(uri.expose(), database).await?)
        }
        StorageConfig::Relational(relational) => {
            Arc::new(RelationalStore::connect(relational).await?)
        }
        StorageConfig::Memory => Arc::new(MemoryStore::new()),
    };

    store.ping().await?;
    info!("{} storage backend is reachable", store.backend());

    Ok(store)
}
