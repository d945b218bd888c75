//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET   /health              - Liveness check
//! GET   /health/ready        - Readiness check (database ping)
//!
//! # Products
//! POST  /products            - Create product
//! GET   /products            - Search (priceMin, priceMax, category, keywords)
//! GET   /products/{id}       - Product detail
//!
//! # Users
//! POST  /users               - Register
//! GET   /users/{id}          - User with expanded cart
//! PATCH /users/{id}          - Change password
//! POST  /users/{id}/cart     - Add or update a cart line
//! ```
//!
//! Anything else answers 404 with a "not found" envelope.

pub mod health;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::AppError;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index).post(products::create))
        .route("/products/{id}", get(products::show))
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create))
        .route("/users/{id}", get(users::show).patch(users::update))
        .route("/users/{id}/cart", post(users::add_to_cart))
}

/// Create all API routes, without middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(product_routes())
        .merge(user_routes())
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
}

/// Build the complete application with its middleware stack.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

async fn not_found() -> AppError {
    AppError::RouteNotFound
}
