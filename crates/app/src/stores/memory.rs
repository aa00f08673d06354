//! In-memory products store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::products::{
    ProductsStore, StoreError,
    models::{Product, ProductData, ProductId},
};

/// Products held in process memory; everything is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryProductsStore {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    products: Vec<Product>,
    last_id: u64,
}

impl MemoryProductsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductsStore for MemoryProductsStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.state.read().await.products.clone())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let state = self.state.read().await;

        Ok(state.products.iter().find(|product| product.id == id).cloned())
    }

    async fn save_product(&self, product: ProductData) -> Result<ProductId, StoreError> {
        let mut state = self.state.write().await;

        // Ids are never reused, even after the newest product is deleted.
        state.last_id += 1;

        let id = ProductId::new(state.last_id.to_string());

        state.products.push(Product::new(id.clone(), product));

        Ok(id)
    }

    async fn update_product(
        &self,
        id: ProductId,
        product: ProductData,
    ) -> Result<Option<ProductId>, StoreError> {
        let mut state = self.state.write().await;

        let Some(existing) = state.products.iter_mut().find(|existing| existing.id == id) else {
            return Ok(None);
        };

        existing.data = product;

        Ok(Some(id))
    }

    async fn delete_product(&self, id: ProductId) -> Result<Option<ProductId>, StoreError> {
        let mut state = self.state.write().await;

        let Some(position) = state.products.iter().position(|product| product.id == id) else {
            return Ok(None);
        };

        state.products.remove(position);

        Ok(Some(id))
    }
}
