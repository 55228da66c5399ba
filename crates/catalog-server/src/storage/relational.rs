//! MySQL product store
//!
//! Every statement binds its values with `?` placeholders; nothing from a
//! request is ever spliced into SQL text.

use crate::config::RelationalConfig;
use async_trait::async_trait;
use catalog_core::{CatalogError, NewProduct, Product, ProductId, ProductStore, Result};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;
use tracing::{debug, info};

pub struct RelationalStore {
    pool: MySqlPool,
}

impl RelationalStore {
    pub async fn connect(config: &RelationalConfig) -> Result<Self> {
        info!(
            "Connecting to MySQL at {}:{} (database {})",
            config.host, config.port, config.database
        );

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(config.password.expose())
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| {
                CatalogError::Connection(format!(
                    "Failed to connect to MySQL at {}:{}: {}",
                    config.host, config.port, e
                ))
            })?;

        info!("MySQL connection established, preparing schema...");
        Self::run_migrations(&pool).await?;
        info!("MySQL store ready");

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &MySqlPool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                price DOUBLE NOT NULL,
                category VARCHAR(255) NOT NULL,
                shopkeeper VARCHAR(255) NOT NULL,
                location VARCHAR(255) NOT NULL,
                image VARCHAR(1024) NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }
}

#[async_trait]
impl ProductStore for RelationalStore {
    fn backend(&self) -> &'static str {
        "relational"
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price, category, shopkeeper, location, image)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.category)
        .bind(&product.shopkeeper)
        .bind(&product.location)
        .bind(&product.image)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        let key = i64::try_from(result.last_insert_id()).map_err(|_| {
            CatalogError::Database(format!(
                "Insert id {} does not fit a signed key",
                result.last_insert_id()
            ))
        })?;
        debug!("Inserted product row {}", key);

        Ok(Product::from_new(ProductId::Key(key), product))
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, price, category, shopkeeper, location, image
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: f64,
    category: String,
    shopkeeper: String,
    location: String,
    image: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Product {
            id: ProductId::Key(r.id),
            name: r.name,
            price: r.price,
            category: r.category,
            shopkeeper: r.shopkeeper,
            location: r.location,
            image: r.image,
        }
    }
}

fn db_error(e: sqlx::Error) -> CatalogError {
    CatalogError::Database(e.to_string())
}
