//! In-memory store backend.
//!
//! Keeps products in insertion order and users in a map. Suitable for tests
//! and for running the service locally without a database; nothing survives
//! a restart.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use tannery_core::{ProductId, UserId};

use super::{ProductStore, RepositoryError, UserStore};
use crate::models::{NewProduct, NewUser, Product, ProductFilter, UserRecord};

/// Process-local implementation of both [`ProductStore`] and [`UserStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    users: RwLock<HashMap<UserId, UserRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn products(&self) -> Result<RwLockReadGuard<'_, Vec<Product>>, RepositoryError> {
        self.products.read().map_err(|_| poisoned())
    }

    fn products_mut(&self) -> Result<RwLockWriteGuard<'_, Vec<Product>>, RepositoryError> {
        self.products.write().map_err(|_| poisoned())
    }

    fn users(&self) -> Result<RwLockReadGuard<'_, HashMap<UserId, UserRecord>>, RepositoryError> {
        self.users.read().map_err(|_| poisoned())
    }

    fn users_mut(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<UserId, UserRecord>>, RepositoryError> {
        self.users.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::DataCorruption("memory store lock poisoned".to_owned())
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let product = Product {
            id: ProductId::generate(),
            name: product.name,
            price: product.price,
            category: product.category,
            created_at: Utc::now(),
        };
        self.products_mut()?.push(product.clone());
        Ok(product)
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.products()?.iter().find(|p| p.id == id).cloned())
    }

    async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .products()?
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn find(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut found: Vec<Product> = self
            .products()?
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal prices
        found.sort_by(|a, b| a.price.cmp(&b.price));
        Ok(found)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: NewUser) -> Result<UserRecord, RepositoryError> {
        let mut users = self.users_mut()?;
        if users.values().any(|u| u.account == user.account) {
            return Err(RepositoryError::Conflict("account already exists".to_owned()));
        }

        let now = Utc::now();
        let record = UserRecord {
            id: UserId::generate(),
            account: user.account,
            password_hash: user.password_hash,
            cart: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: UserId) -> Result<Option<UserRecord>, RepositoryError> {
        Ok(self.users()?.get(&id).cloned())
    }

    async fn save(&self, user: &UserRecord) -> Result<UserRecord, RepositoryError> {
        let mut users = self.users_mut()?;
        let stored = users.get_mut(&user.id).ok_or(RepositoryError::NotFound)?;
        stored.password_hash = user.password_hash.clone();
        stored.cart.clone_from(&user.cart);
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use tannery_core::{Account, Category};

    use super::*;
    use crate::models::{CartLine, FilterBuilder, SecretHash};

    fn new_product(name: &str, price: i64) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            price: Decimal::from(price),
            category: Category::Shoes,
        }
    }

    fn new_user(account: &str) -> NewUser {
        NewUser {
            account: Account::parse(account).unwrap(),
            password_hash: SecretHash::new("hash".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_find_sorts_by_price_keeping_insertion_order() {
        let store = MemoryStore::new();
        ProductStore::insert(&store, new_product("b", 300)).await.unwrap();
        ProductStore::insert(&store, new_product("first-100", 100)).await.unwrap();
        ProductStore::insert(&store, new_product("a", 200)).await.unwrap();
        ProductStore::insert(&store, new_product("second-100", 100)).await.unwrap();

        let names: Vec<String> = store
            .find(&ProductFilter::unrestricted())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["first-100", "second-100", "a", "b"]);
    }

    #[tokio::test]
    async fn test_find_applies_filter() {
        let store = MemoryStore::new();
        ProductStore::insert(&store, new_product("cheap", 50)).await.unwrap();
        ProductStore::insert(&store, new_product("mid", 250)).await.unwrap();

        let filter = FilterBuilder::new().price_at_least(Some(Decimal::from(100))).build();
        let found = store.find(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "mid");
    }

    #[tokio::test]
    async fn test_get_many_skips_missing() {
        let store = MemoryStore::new();
        let kept = ProductStore::insert(&store, new_product("kept", 10))
            .await
            .unwrap();
        let found = store
            .get_many(&[kept.id, ProductId::generate()])
            .await
            .unwrap();
        assert_eq!(found, vec![kept]);
    }

    #[tokio::test]
    async fn test_duplicate_account_conflicts() {
        let store = MemoryStore::new();
        UserStore::insert(&store, new_user("alice01")).await.unwrap();
        let err = UserStore::insert(&store, new_user("alice01"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_save_replaces_cart() {
        let store = MemoryStore::new();
        let mut user = UserStore::insert(&store, new_user("bob1234")).await.unwrap();
        user.cart.push(CartLine {
            product: ProductId::generate(),
            quantity: 2,
        });

        let saved = store.save(&user).await.unwrap();
        assert_eq!(saved.cart, user.cart);

        let loaded = UserStore::get(&store, user.id).await.unwrap().unwrap();
        assert_eq!(loaded.cart, user.cart);
    }

    #[tokio::test]
    async fn test_save_missing_user() {
        let store = MemoryStore::new();
        let mut user = UserStore::insert(&store, new_user("carol99")).await.unwrap();
        user.id = UserId::generate();
        assert!(matches!(
            store.save(&user).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
