//! Products store contract.

use async_trait::async_trait;
use mockall::automock;

use crate::products::{
    errors::StoreError,
    models::{Product, ProductData, ProductId},
};

/// Persistence contract every storage backend implements.
///
/// Lookups by id report a missing record as `Ok(None)`, never as an error, so
/// callers can tell "not found" apart from a backend failure.
#[automock]
#[async_trait]
pub trait ProductsStore: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Retrieves a single product.
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Persists a new product and returns the identifier the store assigned.
    async fn save_product(&self, product: ProductData) -> Result<ProductId, StoreError>;

    /// Replaces the data of an existing product.
    async fn update_product(
        &self,
        id: ProductId,
        product: ProductData,
    ) -> Result<Option<ProductId>, StoreError>;

    /// Deletes a product.
    async fn delete_product(&self, id: ProductId) -> Result<Option<ProductId>, StoreError>;
}
