//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tannery_core::{Category, FieldError, ProductId};

use super::number::decimal_field;

/// A catalog product (domain type).
///
/// Immutable once created; identity is the store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name, searched by keyword.
    pub name: String,
    /// Price, never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Catalog category.
    pub category: Category,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

/// A validated product ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub category: Category,
}

/// Raw create-product payload.
///
/// Every field is optional here so that a missing field is reported as a
/// field validation error rather than a malformed body.
#[derive(Debug, Default, Deserialize)]
pub struct CreateProductInput {
    pub name: Option<String>,
    pub price: Option<Value>,
    pub category: Option<String>,
}

impl CreateProductInput {
    /// Validate the payload, stopping at the first offending field.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] for a missing name, a missing, non-numeric
    /// or negative price, or a missing or unknown category.
    pub fn validate(self) -> Result<NewProduct, FieldError> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| FieldError::missing("name", "product name"))?;

        let price = decimal_field("price", self.price)?
            .ok_or_else(|| FieldError::missing("price", "product price"))?;
        if price < Decimal::ZERO {
            return Err(FieldError::new("price", "price cannot be less than 0"));
        }

        let category = match self.category.as_deref() {
            None | Some("") => return Err(FieldError::missing("category", "product category")),
            Some(label) => Category::parse_field(label)?,
        };

        Ok(NewProduct {
            name,
            price,
            category,
        })
    }
}
