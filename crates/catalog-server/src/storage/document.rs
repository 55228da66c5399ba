//! MongoDB product store

use async_trait::async_trait;
use catalog_core::{CatalogError, NewProduct, Product, ProductId, ProductStore, Result};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const COLLECTION: &str = "products";
const APP_NAME: &str = "catalog-server";

/// Shape of a product document. The collection itself enforces nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    price: f64,
    category: String,
    shopkeeper: String,
    location: String,
    #[serde(default)]
    image: Option<String>,
}

impl From<NewProduct> for ProductDocument {
    fn from(p: NewProduct) -> Self {
        ProductDocument {
            id: None,
            name: p.name,
            price: p.price,
            category: p.category,
            shopkeeper: p.shopkeeper,
            location: p.location,
            image: p.image,
        }
    }
}

impl TryFrom<ProductDocument> for Product {
    type Error = CatalogError;

    fn try_from(d: ProductDocument) -> Result<Self> {
        let id = d
            .id
            .ok_or_else(|| CatalogError::Database("Product document without _id".to_string()))?;

        Ok(Product {
            id: ProductId::Object(id.to_hex()),
            name: d.name,
            price: d.price,
            category: d.category,
            shopkeeper: d.shopkeeper,
            location: d.location,
            image: d.image,
        })
    }
}

pub struct DocumentStore {
    client: Client,
    products: Collection<ProductDocument>,
}

impl DocumentStore {
    /// Build a client for `uri`. The database comes from the URI path when it
    /// names one, otherwise `fallback_database` is used.
    ///
    /// The driver connects lazily; call `ping` to prove the server is there.
    pub async fn connect(uri: &str, fallback_database: &str) -> Result<Self> {
        info!("Connecting to MongoDB...");

        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| CatalogError::Connection(format!("Invalid MongoDB URI: {}", e)))?;
        options.app_name = Some(APP_NAME.to_string());

        let database = options
            .default_database
            .clone()
            .unwrap_or_else(|| fallback_database.to_string());

        let client = Client::with_options(options)
            .map_err(|e| CatalogError::Connection(e.to_string()))?;
        let products = client
            .database(&database)
            .collection::<ProductDocument>(COLLECTION);

        info!("MongoDB client ready (database {})", database);

        Ok(Self { client, products })
    }
}

#[async_trait]
impl ProductStore for DocumentStore {
    fn backend(&self) -> &'static str {
        "document"
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| CatalogError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product> {
        let document = ProductDocument::from(product);

        let result = self
            .products
            .insert_one(&document, None)
            .await
            .map_err(db_error)?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            CatalogError::Database(format!(
                "Unexpected inserted id: {}",
                result.inserted_id
            ))
        })?;
        debug!("Inserted product document {}", id);

        Product::try_from(ProductDocument {
            id: Some(id),
            ..document
        })
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let documents: Vec<ProductDocument> = self
            .products
            .find(None, None)
            .await
            .map_err(db_error)?
            .try_collect::<Vec<_>>()
            .await
            .map_err(db_error)?;

        documents.into_iter().map(Product::try_from).collect()
    }
}

fn db_error(e: mongodb::error::Error) -> CatalogError {
    CatalogError::Database(e.to_string())
}
