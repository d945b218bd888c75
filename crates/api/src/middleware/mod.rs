//! HTTP middleware for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, one hub per request)
//! 2. CORS
//! 3. `TraceLayer` (request span with method, uri, status, latency)
//! 4. Request ID (recorded on the request span and Sentry scope)

pub mod request_id;

pub use request_id::request_id_middleware;
