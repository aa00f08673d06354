//! Product store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("product file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode products: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("mongodb error: {0}")]
    MongoDb(#[from] mongodb::error::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from firestore: {0}")]
    UnexpectedResponse(String),

    #[error("stored product is malformed: {0}")]
    InvalidDocument(String),
}
