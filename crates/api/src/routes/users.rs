//! User and cart route handlers.
//!
//! Responses carry the user without its password hash. Only `show`
//! expands cart lines to full product data.

use axum::extract::State;
use tracing::instrument;

use crate::envelope::Envelope;
use crate::error::Result;
use crate::extract::{ApiJson, ApiPath};
use crate::models::{AddToCartInput, CreateUserInput, UpdateUserInput, UserView};
use crate::state::AppState;

/// Register a user.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateUserInput>,
) -> Result<Envelope<UserView>> {
    let user = state.users().create(input).await?;
    Ok(Envelope::ok(user))
}

/// Get a user with its cart expanded.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Envelope<UserView>> {
    let user = state.users().get(&id).await?;
    Ok(Envelope::ok(user))
}

/// Change a user's password.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<UpdateUserInput>,
) -> Result<Envelope<UserView>> {
    let user = state.users().update_password(&id, input).await?;
    Ok(Envelope::ok(user))
}

/// Add a product to the cart or change its quantity.
#[instrument(skip(state, input))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<AddToCartInput>,
) -> Result<Envelope<UserView>> {
    let user = state.users().add_to_cart(&id, input).await?;
    Ok(Envelope::ok(user))
}
