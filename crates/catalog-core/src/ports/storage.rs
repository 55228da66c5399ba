//! Storage trait for persistence

use crate::Result;
use async_trait::async_trait;
use catalog_types::{NewProduct, Product};

/// Product store
///
/// Implementations persist whatever they are given. Field validation happens
/// before a `NewProduct` exists, so adapters never re-check it.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Short backend name used in logs and health output
    fn backend(&self) -> &'static str;

    /// Round trip to the backend without touching product data
    async fn ping(&self) -> Result<()>;

    async fn create_product(&self, product: NewProduct) -> Result<Product>;

    /// Every stored product, in the backend's natural order
    async fn list_products(&self) -> Result<Vec<Product>>;
}
