//! Domain models for the API.
//!
//! These types represent validated domain objects, separate from database
//! row types and from the raw request payloads they are built from.

pub mod filter;
pub mod number;
pub mod product;
pub mod user;

pub use filter::{FilterBuilder, NamePattern, Predicate, ProductFilter};
pub use product::{CreateProductInput, NewProduct, Product};
pub use user::{
    AddToCartInput, CartLine, CartLineView, CreateUserInput, NewUser, SecretHash,
    UpdateUserInput, UserRecord, UserView,
};
