//! Product Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Product identifier.
///
/// Opaque to everything but the store that assigned it: numeric strings for
/// the file and memory stores, object ids for `MongoDB`, document ids for
/// Firestore.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Product Data
///
/// Everything persisted for a product except its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    pub name: String,
    pub description: String,
    pub code: String,
    pub url: String,

    /// Kept as the JSON number the client sent, integer or not.
    pub price: Number,
    pub stock: Number,

    /// Set by the HTTP layer on create and refreshed on update.
    pub timestamp: Timestamp,
}

/// Product Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    #[serde(flatten)]
    pub data: ProductData,
}

impl Product {
    #[must_use]
    pub fn new(id: ProductId, data: ProductData) -> Self {
        Self { id, data }
    }
}
