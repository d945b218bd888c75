//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::db::{MemoryStore, ProductRepository, ProductStore, UserRepository, UserStore};
use crate::services::{CatalogService, CredentialHasher, UserService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the stores and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    products: Arc<dyn ProductStore>,
    users: Arc<dyn UserStore>,
    hasher: CredentialHasher,
    pool: Option<PgPool>,
}

impl AppState {
    /// Create state backed by `PostgreSQL`.
    #[must_use]
    pub fn postgres(config: ApiConfig, pool: PgPool) -> Self {
        Self::build(
            config,
            Arc::new(ProductRepository::new(pool.clone())),
            Arc::new(UserRepository::new(pool.clone())),
            Some(pool),
        )
    }

    /// Create state backed by a fresh in-memory store.
    #[must_use]
    pub fn in_memory(config: ApiConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::build(config, store.clone(), store, None)
    }

    fn build(
        config: ApiConfig,
        products: Arc<dyn ProductStore>,
        users: Arc<dyn UserStore>,
        pool: Option<PgPool>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products,
                users,
                hasher: CredentialHasher::new(),
                pool,
            }),
        }
    }

    /// Get the database pool, if the `PostgreSQL` backend is in use.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    /// Catalog service over the configured product store.
    #[must_use]
    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(self.inner.products.as_ref())
    }

    /// User service over the configured stores.
    #[must_use]
    pub fn users(&self) -> UserService<'_> {
        UserService::new(
            self.inner.users.as_ref(),
            self.inner.products.as_ref(),
            &self.inner.hasher,
            self.inner.config.cart_merge,
        )
    }
}
