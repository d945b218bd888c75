//! Persistence for products and users.
//!
//! Services talk to storage only through the [`ProductStore`] and
//! [`UserStore`] traits. Two backends implement both:
//!
//! - [`ProductRepository`] / [`UserRepository`] - `PostgreSQL` via sqlx
//! - [`MemoryStore`] - process-local maps, for tests and local development
//!
//! # Database: `tannery`
//!
//! ## Tables
//!
//! - `tannery.products` - Catalog products
//! - `tannery.users` - Users, with the cart embedded as a JSONB document
//!
//! The schema is created idempotently at startup by [`ensure_schema`].

pub mod memory;
pub mod products;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use tannery_core::{ProductId, UserId};

use crate::models::{NewProduct, NewUser, Product, ProductFilter, UserRecord};

pub use memory::MemoryStore;
pub use products::ProductRepository;
pub use users::UserRepository;

/// DDL applied by [`ensure_schema`].
const SCHEMA: &str = include_str!("schema.sql");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique account).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Product collection operations.
///
/// Implementations must be thread-safe (`Send + Sync`) as they are shared
/// across concurrent requests.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a product, assigning its id.
    async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError>;

    /// Get a product by id.
    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Resolve a set of product references. Missing ids are skipped.
    async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError>;

    /// Find every product matching `filter`, sorted by price ascending.
    ///
    /// Products with equal prices keep insertion order.
    async fn find(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError>;
}

/// User collection operations.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user, assigning its id.
    ///
    /// Returns `RepositoryError::Conflict` if the account is taken.
    async fn insert(&self, user: NewUser) -> Result<UserRecord, RepositoryError>;

    /// Get a user by id.
    async fn get(&self, id: UserId) -> Result<Option<UserRecord>, RepositoryError>;

    /// Write the whole aggregate back and return it as stored.
    ///
    /// Returns `RepositoryError::NotFound` if the user no longer exists.
    async fn save(&self, user: &UserRecord) -> Result<UserRecord, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Create the `tannery` schema and its tables if they do not exist.
///
/// # Errors
///
/// Returns `sqlx::Error` if any statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

/// Map a unique-constraint violation to `Conflict`, anything else to `Database`.
fn conflict_or_database(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}
