//! Core types for Tannery.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod account;
pub mod category;
pub mod id;
pub mod validation;

pub use account::{Account, AccountError};
pub use category::Category;
pub use id::*;
pub use validation::FieldError;
