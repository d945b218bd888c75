//! User service.
//!
//! Owns the user aggregate: account creation, password changes and cart
//! updates. Every mutation loads the whole aggregate, changes it in memory,
//! validates it and writes it back with a single save.

use secrecy::SecretString;
use tracing::instrument;

use tannery_core::{Account, FieldError, ProductId, UserId};

use super::cart::{self, MergePolicy};
use super::{CredentialHasher, Resource, ServiceError};
use crate::db::{ProductStore, RepositoryError, UserStore};
use crate::models::{
    AddToCartInput, CreateUserInput, NewUser, UpdateUserInput, UserRecord, UserView,
};

/// User service.
pub struct UserService<'a> {
    users: &'a dyn UserStore,
    products: &'a dyn ProductStore,
    hasher: &'a CredentialHasher,
    merge_policy: MergePolicy,
}

impl<'a> UserService<'a> {
    /// Create a new user service.
    #[must_use]
    pub const fn new(
        users: &'a dyn UserStore,
        products: &'a dyn ProductStore,
        hasher: &'a CredentialHasher,
        merge_policy: MergePolicy,
    ) -> Self {
        Self {
            users,
            products,
            hasher,
            merge_policy,
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for an invalid account or password,
    /// `ServiceError::Conflict` if the account is taken.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateUserInput) -> Result<UserView, ServiceError> {
        let account = Account::parse(input.account.as_deref().unwrap_or_default())
            .map_err(FieldError::from)?;
        let password: SecretString = input
            .password
            .ok_or_else(|| FieldError::missing("password", "password"))?;
        let password_hash = self.hasher.hash(&password)?;

        let user = self
            .users
            .insert(NewUser {
                account,
                password_hash,
            })
            .await?;
        tracing::info!(user_id = %user.id, "user created");

        Ok(UserView::from(&user))
    }

    /// Get a user with its cart references expanded to product data.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::MalformedId` or `ServiceError::NotFound`.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<UserView, ServiceError> {
        let user = self.load(id).await?;
        self.expand(&user).await
    }

    /// Change a user's password.
    ///
    /// An absent password leaves the stored hash untouched and nothing is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::MalformedId`, `ServiceError::NotFound`, or
    /// `ServiceError::Validation` for a password of the wrong length.
    #[instrument(skip(self, input))]
    pub async fn update_password(
        &self,
        id: &str,
        input: UpdateUserInput,
    ) -> Result<UserView, ServiceError> {
        let mut user = self.load(id).await?;

        let Some(password_hash) = self.hasher.prepare(input.password.as_ref())? else {
            return Ok(UserView::from(&user));
        };
        user.password_hash = password_hash;

        let user = self.save(&user).await?;
        tracing::info!(user_id = %user.id, "password changed");
        Ok(UserView::from(&user))
    }

    /// Add a product to a user's cart, or change the quantity of the line
    /// already holding it.
    ///
    /// Nothing is written unless both the user and the product exist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::MalformedId` for either id,
    /// `ServiceError::Validation` for a bad payload and
    /// `ServiceError::NotFound` for a missing user or product.
    #[instrument(skip(self, input))]
    pub async fn add_to_cart(
        &self,
        id: &str,
        input: AddToCartInput,
    ) -> Result<UserView, ServiceError> {
        let user_id = UserId::parse(id)?;
        let (product, quantity) = input.validate()?;

        let mut user = self
            .users
            .get(user_id)
            .await?
            .ok_or(ServiceError::NotFound(Resource::User))?;

        let product_id = ProductId::parse(&product)?;
        if self.products.get(product_id).await?.is_none() {
            return Err(ServiceError::NotFound(Resource::Product));
        }

        let change = cart::reconcile(&mut user.cart, product_id, quantity, self.merge_policy);
        tracing::debug!(?change, policy = %self.merge_policy, "cart reconciled");

        let user = self.save(&user).await?;
        Ok(UserView::from(&user))
    }

    async fn load(&self, id: &str) -> Result<UserRecord, ServiceError> {
        let id = UserId::parse(id)?;
        self.users
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound(Resource::User))
    }

    /// Validate the aggregate and write it back.
    async fn save(&self, user: &UserRecord) -> Result<UserRecord, ServiceError> {
        user.validate()?;
        self.users.save(user).await.map_err(|e| match e {
            RepositoryError::NotFound => ServiceError::NotFound(Resource::User),
            other => other.into(),
        })
    }

    async fn expand(&self, user: &UserRecord) -> Result<UserView, ServiceError> {
        let ids: Vec<ProductId> = user.cart.iter().map(|line| line.product).collect();
        let products = if ids.is_empty() {
            Vec::new()
        } else {
            self.products.get_many(&ids).await?
        };
        Ok(UserView::expanded(user, &products))
    }
}
