//! Tannery Core - Shared domain types.
//!
//! This crate provides the types used across the Tannery components:
//! - `api` - HTTP service for catalog search and shopping carts
//! - `integration-tests` - Black-box tests against a running service
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe ids, accounts, categories and field validation errors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
