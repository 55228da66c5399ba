//! In-memory product store using DashMap (for local runs and tests)

use async_trait::async_trait;
use catalog_core::{NewProduct, Product, ProductId, ProductStore, Result};
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// Products keyed by a sequential id; nothing survives a restart
pub struct MemoryStore {
    products: DashMap<i64, Product>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product> {
        let key = self.next_id.fetch_add(1, Ordering::Relaxed);
        let product = Product::from_new(ProductId::Key(key), product);
        self.products.insert(key, product.clone());
        Ok(product)
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let mut entries: Vec<(i64, Product)> = self
            .products
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        entries.sort_by_key(|(key, _)| *key);

        Ok(entries.into_iter().map(|(_, product)| product).collect())
    }
}
