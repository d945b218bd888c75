//! Product repository for `PostgreSQL`.
//!
//! Queries are runtime-checked; the catalog search is assembled with
//! `sqlx::QueryBuilder` so each predicate binds its own parameters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use tannery_core::{Category, ProductId};

use super::{ProductStore, RepositoryError};
use crate::models::{NewProduct, Predicate, Product, ProductFilter};

const SELECT_PRODUCT: &str = "SELECT id, name, price, category, created_at FROM tannery.products";

#[derive(FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    price: Decimal,
    category: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = Category::from_label(&row.category).ok_or_else(|| {
            RepositoryError::DataCorruption(format!("invalid category in database: {}", row.category))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            price: row.price,
            category,
            created_at: row.created_at,
        })
    }
}

/// Repository for product database operations.
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO tannery.products (id, name, price, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, category, created_at
            ",
        )
        .bind(ProductId::generate())
        .bind(&product.name)
        .bind(product.price)
        .bind(product.category.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = ids.iter().map(ProductId::as_uuid).collect();
        let rows = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} WHERE id = ANY($1)"))
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn find(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_PRODUCT);
        push_filter(&mut query, filter);
        query.push(" ORDER BY price ASC, created_at ASC");

        let rows = query
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }
}

/// Append a `WHERE` clause for `filter`; nothing for an unrestricted filter.
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    for (i, predicate) in filter.predicates().iter().enumerate() {
        query.push(if i == 0 { " WHERE " } else { " AND " });

        match predicate {
            Predicate::PriceAtLeast(min) => {
                query.push("price >= ").push_bind(*min);
            }
            Predicate::PriceAtMost(max) => {
                query.push("price <= ").push_bind(*max);
            }
            Predicate::CategoryIs(label) => {
                query.push("category = ").push_bind(label.clone());
            }
            Predicate::NameMatchesAny(patterns) if patterns.is_empty() => {
                query.push("FALSE");
            }
            Predicate::NameMatchesAny(patterns) => {
                query.push("(");
                for (j, pattern) in patterns.iter().enumerate() {
                    if j > 0 {
                        query.push(" OR ");
                    }
                    query.push("name ~* ").push_bind(pattern.as_str().to_owned());
                }
                query.push(")");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilterBuilder;

    #[test]
    fn test_unrestricted_filter_has_no_where_clause() {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_PRODUCT);
        push_filter(&mut query, &ProductFilter::unrestricted());
        assert_eq!(query.sql(), SELECT_PRODUCT);
    }

    #[test]
    fn test_filter_sql_shape() {
        let filter = FilterBuilder::new()
            .price_at_least(Some(Decimal::from(100)))
            .price_at_most(Some(Decimal::from(500)))
            .category(Some("鞋".to_owned()))
            .name_matches_any(&["黑", "皮"])
            .build();

        let mut query = QueryBuilder::<Postgres>::new(SELECT_PRODUCT);
        push_filter(&mut query, &filter);

        assert_eq!(
            query.sql(),
            format!(
                "{SELECT_PRODUCT} WHERE price >= $1 AND price <= $2 AND category = $3 \
                 AND (name ~* $4 OR name ~* $5)"
            )
        );
    }
}
