//! Product route handlers.

use std::collections::HashMap;

use axum::extract::State;
use tracing::instrument;

use crate::envelope::Envelope;
use crate::error::Result;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::{CreateProductInput, Product};
use crate::state::AppState;

/// Create a product.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateProductInput>,
) -> Result<Envelope<Product>> {
    let product = state.catalog().create(input).await?;
    Ok(Envelope::ok(product))
}

/// Search products, cheapest first.
///
/// Recognized parameters: `priceMin`, `priceMax`, `category`, `keywords`.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<HashMap<String, String>>,
) -> Result<Envelope<Vec<Product>>> {
    let products = state.catalog().list(&params).await?;
    Ok(Envelope::ok(products))
}

/// Get a product by id.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Envelope<Product>> {
    let product = state.catalog().get(&id).await?;
    Ok(Envelope::ok(product))
}
