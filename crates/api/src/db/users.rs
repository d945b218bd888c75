//! User repository for `PostgreSQL`.
//!
//! The cart is embedded in the user row as a JSONB array and is always
//! read and written together with the rest of the aggregate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use tannery_core::{Account, UserId};

use super::{RepositoryError, UserStore, conflict_or_database};
use crate::models::{CartLine, NewUser, SecretHash, UserRecord};

#[derive(FromRow)]
struct UserRow {
    id: UserId,
    account: String,
    password_hash: String,
    cart: Json<Vec<CartLine>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let account = Account::parse(&row.account).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid account in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            account,
            password_hash: SecretHash::new(row.password_hash),
            cart: row.cart.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for user database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, user: NewUser) -> Result<UserRecord, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO tannery.users (id, account, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, account, password_hash, cart, created_at, updated_at
            ",
        )
        .bind(UserId::generate())
        .bind(&user.account)
        .bind(user.password_hash.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or_database(e, "account"))?;

        row.try_into()
    }

    async fn get(&self, id: UserId) -> Result<Option<UserRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, account, password_hash, cart, created_at, updated_at
            FROM tannery.users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn save(&self, user: &UserRecord) -> Result<UserRecord, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            UPDATE tannery.users
            SET password_hash = $2, cart = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, account, password_hash, cart, created_at, updated_at
            ",
        )
        .bind(user.id)
        .bind(user.password_hash.as_str())
        .bind(Json(&user.cart))
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }
}
