//! Tannery API library.
//!
//! Catalog search and shopping carts over HTTP. The binary in `main.rs`
//! only wires configuration, telemetry and the listener around
//! [`routes::app`]; everything else lives here so it can be tested.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
