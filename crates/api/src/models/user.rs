//! User aggregate types.
//!
//! A user exclusively owns its embedded cart lines. Cart lines only
//! reference products by id; product data is resolved at read time.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use tannery_core::{Account, FieldError, ProductId, UserId};

use super::number::decimal_field;
use super::product::Product;

/// A derived password hash in PHC string format.
///
/// Has no `Serialize` impl and redacts itself in `Debug`, so it cannot leak
/// into responses or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretHash(String);

impl SecretHash {
    /// Wrap an already-derived hash string.
    #[must_use]
    pub const fn new(hash: String) -> Self {
        Self(hash)
    }

    /// The PHC string, for storage and verification only.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretHash([REDACTED])")
    }
}

/// One line of a user's cart.
///
/// Stored as part of the user document; `product` is a weak reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: ProductId,
    pub quantity: u32,
}

/// A stored user (domain type).
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique user ID.
    pub id: UserId,
    /// Login account name, unique across users.
    pub account: Account,
    /// Hash of the user's password.
    pub password_hash: SecretHash,
    /// Cart lines, at most one per product.
    pub cart: Vec<CartLine>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last saved.
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Check the aggregate invariants before it is written back.
    ///
    /// # Errors
    ///
    /// Returns a `cart` [`FieldError`] if two lines reference the same product.
    pub fn validate(&self) -> Result<(), FieldError> {
        let mut seen = HashSet::with_capacity(self.cart.len());
        for line in &self.cart {
            if !seen.insert(line.product) {
                return Err(FieldError::new(
                    "cart",
                    format!("duplicate cart line for product {}", line.product),
                ));
            }
        }
        Ok(())
    }
}

/// A validated user ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub account: Account,
    pub password_hash: SecretHash,
}

// =============================================================================
// Output
// =============================================================================

/// A cart line as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Expanded product data, present only when the reference was resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

/// A user as returned to callers. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub account: Account,
    pub cart: Vec<CartLineView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserView {
    /// Build a view with cart references expanded from `products`.
    ///
    /// References whose product no longer exists stay unexpanded.
    #[must_use]
    pub fn expanded(user: &UserRecord, products: &[Product]) -> Self {
        let mut view = Self::from(user);
        for line in &mut view.cart {
            line.product = products.iter().find(|p| p.id == line.product_id).cloned();
        }
        view
    }
}

impl From<&UserRecord> for UserView {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            account: user.account.clone(),
            cart: user
                .cart
                .iter()
                .map(|line| CartLineView {
                    product_id: line.product,
                    quantity: line.quantity,
                    product: None,
                })
                .collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// =============================================================================
// Input
// =============================================================================

/// Deserialize an optional plaintext secret straight into a `SecretString`.
fn secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

/// Raw create-user payload.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserInput {
    pub account: Option<String>,
    #[serde(default, deserialize_with = "secret")]
    pub password: Option<SecretString>,
}

/// Raw update-user payload. Only the password can change.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserInput {
    #[serde(default, deserialize_with = "secret")]
    pub password: Option<SecretString>,
}

/// Raw add-to-cart payload.
#[derive(Debug, Default, Deserialize)]
pub struct AddToCartInput {
    pub product: Option<String>,
    pub quantity: Option<Value>,
}

impl AddToCartInput {
    /// Validate the payload, returning the raw product id and quantity.
    ///
    /// The product id is only checked for presence here; its format is
    /// checked when it is looked up.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] for a missing product, or a quantity that is
    /// missing, not a number, fractional, or outside `0..=u32::MAX`.
    pub fn validate(self) -> Result<(String, u32), FieldError> {
        let product = self
            .product
            .filter(|p| !p.is_empty())
            .ok_or_else(|| FieldError::missing("product", "product id"))?;

        let quantity = decimal_field("quantity", self.quantity)?
            .ok_or_else(|| FieldError::missing("quantity", "quantity"))?;
        if quantity < Decimal::ZERO {
            return Err(FieldError::new("quantity", "quantity cannot be less than 0"));
        }
        if !quantity.fract().is_zero() {
            return Err(FieldError::new("quantity", "quantity must be a whole number"));
        }
        let quantity = quantity
            .to_u32()
            .ok_or_else(|| FieldError::new("quantity", "quantity is too large"))?;

        Ok((product, quantity))
    }
}
