//! JSON file products store.

use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};
use tracing::debug;

use crate::products::{
    ProductsStore, StoreError,
    models::{Product, ProductData, ProductId},
};

use super::next_sequential_id;

/// Configuration for the file store.
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    /// Path of the JSON file holding the product array.
    pub path: PathBuf,
}

/// Products kept as a single JSON array on disk.
///
/// A missing or blank file reads as an empty store. Writes replace the whole
/// file by renaming a sibling temporary file over it, and every read or write
/// holds `lock`.
#[derive(Debug)]
pub struct FileProductsStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileProductsStore {
    #[must_use]
    pub fn new(config: FileStoreConfig) -> Self {
        Self {
            path: config.path,
            lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Vec<Product>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "products file missing, treating as empty");

                return Ok(Vec::new());
            }
            Err(error) => return Err(error.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write_all(&self, products: &[Product]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");

        fs::write(&staging, serde_json::to_vec_pretty(products)?).await?;
        fs::rename(&staging, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl ProductsStore for FileProductsStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let _guard = self.lock.lock().await;

        self.read_all().await
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let _guard = self.lock.lock().await;

        Ok(self
            .read_all()
            .await?
            .into_iter()
            .find(|product| product.id == id))
    }

    async fn save_product(&self, product: ProductData) -> Result<ProductId, StoreError> {
        let _guard = self.lock.lock().await;

        let mut products = self.read_all().await?;
        let id = next_sequential_id(&products);

        products.push(Product::new(id.clone(), product));

        self.write_all(&products).await?;

        Ok(id)
    }

    async fn update_product(
        &self,
        id: ProductId,
        product: ProductData,
    ) -> Result<Option<ProductId>, StoreError> {
        let _guard = self.lock.lock().await;

        let mut products = self.read_all().await?;

        let Some(existing) = products.iter_mut().find(|existing| existing.id == id) else {
            return Ok(None);
        };

        existing.data = product;

        self.write_all(&products).await?;

        Ok(Some(id))
    }

    async fn delete_product(&self, id: ProductId) -> Result<Option<ProductId>, StoreError> {
        let _guard = self.lock.lock().await;

        let mut products = self.read_all().await?;
        let before = products.len();

        products.retain(|product| product.id != id);

        if products.len() == before {
            return Ok(None);
        }

        self.write_all(&products).await?;

        Ok(Some(id))
    }
}
