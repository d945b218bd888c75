//! Business logic services.
//!
//! # Services
//!
//! - `catalog` - Product creation, lookup and search
//! - `users` - User creation, lookup, password updates and cart changes
//! - `credentials` - Password length validation and Argon2 hashing
//! - `cart` - Cart line reconciliation (pure, no I/O)
//!
//! Services validate input explicitly before any store call and report
//! failures as [`ServiceError`].

pub mod cart;
pub mod catalog;
pub mod credentials;
mod error;
pub mod users;

pub use cart::{CartChange, MergePolicy};
pub use catalog::CatalogService;
pub use credentials::CredentialHasher;
pub use error::{Resource, ServiceError};
pub use users::UserService;
