//! Catalog service.
//!
//! Creates products, looks them up by id and runs filtered searches.

pub mod query;

pub use query::CatalogQuery;

use std::collections::HashMap;

use tracing::instrument;

use tannery_core::ProductId;

use super::{Resource, ServiceError};
use crate::db::ProductStore;
use crate::models::{CreateProductInput, Product};

/// Catalog service.
pub struct CatalogService<'a> {
    products: &'a dyn ProductStore,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(products: &'a dyn ProductStore) -> Self {
        Self { products }
    }

    /// Validate and insert a product.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for the first invalid field, or
    /// `ServiceError::Repository` if the insert fails.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateProductInput) -> Result<Product, ServiceError> {
        let product = input.validate()?;
        let product = self.products.insert(product).await?;
        tracing::info!(product_id = %product.id, "product created");
        Ok(product)
    }

    /// Get a product by its textual id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::MalformedId` if `id` is not a valid id and
    /// `ServiceError::NotFound` if no such product exists.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Product, ServiceError> {
        let id = ProductId::parse(id)?;
        self.products
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound(Resource::Product))
    }

    /// List products matching the raw search parameters, cheapest first.
    ///
    /// Malformed parameters are dropped; they never fail the search.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store query fails.
    #[instrument(skip(self, params))]
    pub async fn list(&self, params: &HashMap<String, String>) -> Result<Vec<Product>, ServiceError> {
        let filter = CatalogQuery::from_params(params).into_filter();
        tracing::debug!(predicates = filter.predicates().len(), "searching products");
        Ok(self.products.find(&filter).await?)
    }
}
