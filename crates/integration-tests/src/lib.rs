//! Integration tests for Tannery.
//!
//! These tests talk to a running API over HTTP and are ignored by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the API (in-memory store is enough)
//! TANNERY_STORE=memory cargo run -p tannery-api
//!
//! # Run the ignored tests against it
//! cargo test -p tannery-integration-tests -- --ignored
//! ```
//!
//! Set `TANNERY_BASE_URL` to target a server other than
//! `http://localhost:4000`.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("TANNERY_BASE_URL").unwrap_or_else(|_| "http://localhost:4000".to_string())
}

/// An API response envelope as seen by clients.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub result: Option<Value>,
}

/// A unique, valid account name so reruns against a live server never
/// collide.
#[must_use]
pub fn unique_account() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("it{}", simple.get(..12).unwrap_or(&simple))
}

/// Thin client over the API routes used by the tests.
pub struct TestClient {
    client: Client,
    base_url: String,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// Create a client for [`base_url`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: base_url(),
        }
    }

    /// Send a request and decode the envelope.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the request fails or the body is not an
    /// envelope.
    pub async fn call(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<(reqwest::StatusCode, Envelope), reqwest::Error> {
        let mut request = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        Ok((status, response.json().await?))
    }
}
