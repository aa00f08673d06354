//! Store adapters
//!
//! One adapter per supported backend. The process picks exactly one of them
//! at startup, see [`crate::context::AppContext::from_store_config`].

mod file;
mod firestore;
mod memory;
mod mongo;

pub use file::{FileProductsStore, FileStoreConfig};
pub use firestore::{FirestoreConfig, FirestoreProductsStore};
pub use memory::MemoryProductsStore;
pub use mongo::{MongoDbConfig, MongoProductsStore};

use crate::products::models::{Product, ProductId};

/// How remote stores behave while being constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectMode {
    /// Round-trip to the backend during startup so a bad connection fails fast.
    #[default]
    Eager,

    /// Defer all backend traffic to the first request.
    Lazy,
}

impl ConnectMode {
    #[must_use]
    pub fn from_eager_flag(eager: bool) -> Self {
        if eager { Self::Eager } else { Self::Lazy }
    }
}

/// Backend selection plus whatever that backend needs to start.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    File(FileStoreConfig),
    Firestore(FirestoreConfig),
    MongoDb(MongoDbConfig),
    Memory,
}

impl StoreConfig {
    /// Short backend name used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Firestore(_) => "firestore",
            Self::MongoDb(_) => "mongodb",
            Self::Memory => "memory",
        }
    }
}

/// Next sequential id for stores that hand out numeric identifiers.
fn next_sequential_id(products: &[Product]) -> ProductId {
    let highest = products
        .iter()
        .filter_map(|product| product.id.as_str().parse::<u64>().ok())
        .max()
        .unwrap_or(0);

    ProductId::new((highest + 1).to_string())
}
