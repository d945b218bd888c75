//! Unified error handling with Sentry integration.
//!
//! Every failure leaves the API as an [`Envelope`] with `success: false`.
//! Known outcomes map to a fixed status and message; anything else is
//! captured to Sentry, logged, and reported as "unknown error" without
//! detail. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::envelope::Envelope;
use crate::services::{Resource, ServiceError};

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// A service operation failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The request body could not be read as the expected JSON.
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    /// The query string could not be decoded.
    #[error("malformed query string: {0}")]
    MalformedQuery(#[from] QueryRejection),

    /// A path parameter could not be decoded.
    #[error("malformed path parameter: {0}")]
    MalformedPath(#[from] PathRejection),

    /// No route matches the request path and method.
    #[error("route not found")]
    RouteNotFound,
}

impl AppError {
    /// The HTTP status and caller-facing message for this error.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Service(err) => match err {
                ServiceError::Validation(field) => (StatusCode::BAD_REQUEST, field.message.clone()),
                ServiceError::MalformedId(_) => {
                    (StatusCode::BAD_REQUEST, "invalid id format".to_string())
                }
                ServiceError::NotFound(resource) => (
                    StatusCode::NOT_FOUND,
                    match resource {
                        Resource::User => "user not found".to_string(),
                        Resource::Product => "product not found".to_string(),
                    },
                ),
                ServiceError::Conflict(_) => {
                    (StatusCode::CONFLICT, "account already taken".to_string())
                }
                ServiceError::PasswordHash | ServiceError::Repository(_) => unknown(),
            },
            Self::MalformedBody(_) | Self::MalformedQuery(_) => (
                StatusCode::BAD_REQUEST,
                "malformed request data".to_string(),
            ),
            Self::MalformedPath(_) => (StatusCode::BAD_REQUEST, "invalid id format".to_string()),
            Self::RouteNotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
        }
    }
}

fn unknown() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "unknown error".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        // Capture unclassified errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }

        // Don't expose internal error details to clients
        (status, Json(Envelope::failure(message))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
