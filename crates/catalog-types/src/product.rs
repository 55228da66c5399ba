//! Product types

use serde::{Deserialize, Serialize};

/// Identifier assigned by the storage backend.
///
/// The relational store hands out auto-incrementing keys, the document store
/// hands out object ids. Both serialize as a bare JSON scalar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Key(i64),
    Object(String),
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductId::Key(key) => write!(f, "{}", key),
            ProductId::Object(oid) => write!(f, "{}", oid),
        }
    }
}

/// A validated product that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub category: String,
    pub shopkeeper: String,
    pub location: String,
    /// Public path of the uploaded image, e.g. `/uploads/1700000000000-mango.png`
    pub image: Option<String>,
}

/// A stored product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub shopkeeper: String,
    pub location: String,
    pub image: Option<String>,
}

impl Product {
    pub fn from_new(id: ProductId, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            price: new.price,
            category: new.category,
            shopkeeper: new.shopkeeper,
            location: new.location,
            image: new.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mango() -> NewProduct {
        NewProduct {
            name: "Mango".to_string(),
            price: 50.0,
            category: "Fruit".to_string(),
            shopkeeper: "Raju".to_string(),
            location: "Market1".to_string(),
            image: None,
        }
    }

    #[test]
    fn test_id_serializes_as_scalar() {
        let key = serde_json::to_value(ProductId::Key(7)).unwrap();
        assert_eq!(key, serde_json::json!(7));

        let oid = serde_json::to_value(ProductId::Object("65a1f0".to_string())).unwrap();
        assert_eq!(oid, serde_json::json!("65a1f0"));
    }

    #[test]
    fn test_absent_image_is_null() {
        let product = Product::from_new(ProductId::Key(1), mango());
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Mango");
        assert_eq!(json["price"], 50.0);
        assert!(json["image"].is_null());
    }
}
