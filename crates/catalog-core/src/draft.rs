//! Raw product submissions and their validation

use crate::error::ValidationError;
use catalog_types::NewProduct;
use serde::{Deserialize, Deserializer};

/// Product fields exactly as a client submitted them.
///
/// Every field is optional here; `into_new_product` decides whether the
/// submission is complete. JSON bodies may carry numbers where forms carry
/// strings, so each field accepts either.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductDraft {
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub shopkeeper: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub location: Option<String>,
}

impl ProductDraft {
    /// Record a named text field. Returns false for names that are not
    /// product attributes.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "name" => &mut self.name,
            "price" => &mut self.price,
            "category" => &mut self.category,
            "shopkeeper" => &mut self.shopkeeper,
            "location" => &mut self.location,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Validate presence of all five attributes and parse the price.
    ///
    /// Whitespace-only values count as missing. Presence is checked before
    /// the price is parsed, so an incomplete submission always reports
    /// `MissingFields`.
    pub fn into_new_product(self, image: Option<String>) -> Result<NewProduct, ValidationError> {
        let (Some(name), Some(price), Some(category), Some(shopkeeper), Some(location)) = (
            required(self.name),
            required(self.price),
            required(self.category),
            required(self.shopkeeper),
            required(self.location),
        ) else {
            return Err(ValidationError::MissingFields);
        };

        Ok(NewProduct {
            name,
            price: parse_price(&price)?,
            category,
            shopkeeper,
            location,
            image,
        })
    }
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    raw.parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or(ValidationError::InvalidPrice)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }),
    )
}
