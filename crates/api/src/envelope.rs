//! Uniform response envelope.
//!
//! Every response body, success or failure, has the shape
//! `{"success": bool, "message": string, "result"?: payload}`.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The JSON body of every API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> Envelope<T> {
    /// A successful response carrying `result`.
    #[must_use]
    pub const fn ok(result: T) -> Self {
        Self {
            success: true,
            message: String::new(),
            result: Some(result),
        }
    }
}

impl Envelope<()> {
    /// A failed response with a caller-facing message and no result.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            result: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn test_ok_shape() {
        let json = serde_json::to_value(Envelope::ok(vec![1, 2])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "", "result": [1, 2]})
        );
    }

    #[test]
    fn test_failure_omits_result() {
        let json = serde_json::to_value(Envelope::failure("user not found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "message": "user not found"})
        );
    }

    #[test]
    fn test_ok_status() {
        assert_eq!(Envelope::ok("x").into_response().status(), StatusCode::OK);
    }
}
