//! App Context

use std::{fmt, sync::Arc};

use thiserror::Error;
use tracing::info;

use crate::{
    products::{ProductsStore, StoreError},
    stores::{
        FileProductsStore, FirestoreProductsStore, MemoryProductsStore, MongoProductsStore,
        StoreConfig,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to initialise {backend} store: {source}")]
    Store {
        backend: &'static str,
        #[source]
        source: StoreError,
    },
}

/// Everything request handlers need, built once at startup.
#[derive(Clone)]
pub struct AppContext {
    /// Name of the selected store, e.g. `"mongodb"`.
    pub persistence: &'static str,

    pub products: Arc<dyn ProductsStore>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("persistence", &self.persistence)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    #[must_use]
    pub fn new(persistence: &'static str, products: Arc<dyn ProductsStore>) -> Self {
        Self {
            persistence,
            products,
        }
    }

    /// Select and construct the products store named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when a remote store cannot be set up.
    pub async fn from_store_config(config: StoreConfig) -> Result<Self, AppInitError> {
        let backend = config.kind();
        let wrap = |source| AppInitError::Store { backend, source };

        let products: Arc<dyn ProductsStore> = match config {
            StoreConfig::File(config) => {
                info!(path = %config.path.display(), "using file products store");

                Arc::new(FileProductsStore::new(config))
            }
            StoreConfig::Firestore(config) => {
                Arc::new(FirestoreProductsStore::connect(config).await.map_err(wrap)?)
            }
            StoreConfig::MongoDb(config) => {
                Arc::new(MongoProductsStore::connect(config).await.map_err(wrap)?)
            }
            StoreConfig::Memory => Arc::new(MemoryProductsStore::new()),
        };

        info!(backend, "products store ready");

        Ok(Self::new(backend, products))
    }
}
