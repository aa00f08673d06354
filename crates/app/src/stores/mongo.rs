//! `MongoDB` products store.

use async_trait::async_trait;
use futures_util::TryStreamExt as _;
use jiff::Timestamp;
use mongodb::{
    Client, Collection,
    bson::{DateTime, doc, oid::ObjectId},
};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::info;

use crate::products::{
    ProductsStore, StoreError,
    models::{Product, ProductData, ProductId},
};

use super::ConnectMode;

/// `MongoDB` connection settings.
#[derive(Debug, Clone)]
pub struct MongoDbConfig {
    /// Connection string, e.g. `"mongodb://localhost:27017"`.
    pub uri: String,

    /// Database holding the products collection.
    pub database: String,

    /// Products collection name.
    pub collection: String,

    pub mode: ConnectMode,
}

/// Products stored as documents keyed by `ObjectId`.
#[derive(Debug, Clone)]
pub struct MongoProductsStore {
    collection: Collection<ProductDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    description: String,
    code: String,
    url: String,
    price: Number,
    stock: Number,
    timestamp: DateTime,
}

impl From<ProductData> for ProductDocument {
    fn from(data: ProductData) -> Self {
        Self {
            id: None,
            name: data.name,
            description: data.description,
            code: data.code,
            url: data.url,
            price: data.price,
            stock: data.stock,
            timestamp: DateTime::from_millis(data.timestamp.as_millisecond()),
        }
    }
}

impl TryFrom<ProductDocument> for Product {
    type Error = StoreError;

    fn try_from(document: ProductDocument) -> Result<Self, Self::Error> {
        let id = document
            .id
            .ok_or_else(|| StoreError::InvalidDocument("document has no _id".to_string()))?;

        let timestamp = Timestamp::from_millisecond(document.timestamp.timestamp_millis())
            .map_err(|error| StoreError::InvalidDocument(format!("bad timestamp: {error}")))?;

        Ok(Product::new(
            ProductId::new(id.to_hex()),
            ProductData {
                name: document.name,
                description: document.description,
                code: document.code,
                url: document.url,
                price: document.price,
                stock: document.stock,
                timestamp,
            },
        ))
    }
}

impl MongoProductsStore {
    /// Build a store from connection settings.
    ///
    /// In [`ConnectMode::Eager`] the server is pinged before returning.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection string is invalid or, in eager
    /// mode, when the server cannot be reached.
    pub async fn connect(config: MongoDbConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri).await?;
        let database = client.database(&config.database);

        if config.mode == ConnectMode::Eager {
            database.run_command(doc! { "ping": 1 }).await?;

            info!(database = %config.database, "connected to mongodb");
        }

        Ok(Self {
            collection: database.collection(&config.collection),
        })
    }
}

/// Identifiers that are not valid object ids can never match a document.
fn parse_object_id(id: &ProductId) -> Option<ObjectId> {
    ObjectId::parse_str(id.as_str()).ok()
}

#[async_trait]
impl ProductsStore for MongoProductsStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let documents: Vec<ProductDocument> =
            self.collection.find(doc! {}).await?.try_collect().await?;

        documents.into_iter().map(Product::try_from).collect()
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let Some(object_id) = parse_object_id(&id) else {
            return Ok(None);
        };

        self.collection
            .find_one(doc! { "_id": object_id })
            .await?
            .map(Product::try_from)
            .transpose()
    }

    async fn save_product(&self, product: ProductData) -> Result<ProductId, StoreError> {
        let inserted = self
            .collection
            .insert_one(ProductDocument::from(product))
            .await?;

        inserted
            .inserted_id
            .as_object_id()
            .map(|object_id| ProductId::new(object_id.to_hex()))
            .ok_or_else(|| StoreError::InvalidDocument("inserted _id is not an ObjectId".into()))
    }

    async fn update_product(
        &self,
        id: ProductId,
        product: ProductData,
    ) -> Result<Option<ProductId>, StoreError> {
        let Some(object_id) = parse_object_id(&id) else {
            return Ok(None);
        };

        let result = self
            .collection
            .replace_one(doc! { "_id": object_id }, ProductDocument::from(product))
            .await?;

        Ok((result.matched_count > 0).then_some(id))
    }

    async fn delete_product(&self, id: ProductId) -> Result<Option<ProductId>, StoreError> {
        let Some(object_id) = parse_object_id(&id) else {
            return Ok(None);
        };

        let result = self.collection.delete_one(doc! { "_id": object_id }).await?;

        Ok((result.deleted_count > 0).then_some(id))
    }
}

#[cfg(test)]
mod tests {
    use testcontainers_modules::{mongo::Mongo, testcontainers::runners::AsyncRunner as _};
    use testresult::TestResult;

    use crate::test::helpers::product_data;

    use super::*;

    #[test]
    fn document_round_trips_product_data() -> TestResult {
        let data = product_data("A");
        let object_id = ObjectId::new();

        let mut document = ProductDocument::from(data.clone());
        document.id = Some(object_id);

        let product = Product::try_from(document)?;

        assert_eq!(product.id, ProductId::new(object_id.to_hex()));
        assert_eq!(product.data, data);

        Ok(())
    }

    #[test]
    fn document_without_id_is_invalid() {
        let result = Product::try_from(ProductDocument::from(product_data("A")));

        assert!(
            matches!(result, Err(StoreError::InvalidDocument(_))),
            "expected InvalidDocument, got {result:?}"
        );
    }

    #[test]
    fn malformed_ids_never_parse() {
        assert!(parse_object_id(&ProductId::from("1")).is_none());
        assert!(parse_object_id(&ProductId::from("zzzzzzzzzzzzzzzzzzzzzzzz")).is_none());
        assert!(parse_object_id(&ProductId::new(ObjectId::new().to_hex())).is_some());
    }

    #[tokio::test]
    #[ignore = "requires a docker daemon"]
    async fn crud_against_a_real_server() -> TestResult {
        let container = Mongo::default().start().await?;
        let port = container.get_host_port_ipv4(27017).await?;

        let store = MongoProductsStore::connect(MongoDbConfig {
            uri: format!("mongodb://127.0.0.1:{port}"),
            database: "catalog_test".to_string(),
            collection: "products".to_string(),
            mode: ConnectMode::Eager,
        })
        .await?;

        let id = store.save_product(product_data("A")).await?;

        let fetched = store.get_product(id.clone()).await?;
        assert_eq!(fetched.map(|product| product.data), Some(product_data("A")));

        let updated = store.update_product(id.clone(), product_data("Z")).await?;
        assert_eq!(updated, Some(id.clone()));

        assert_eq!(store.list_products().await?.len(), 1);

        assert_eq!(store.delete_product(id.clone()).await?, Some(id.clone()));
        assert_eq!(store.delete_product(id.clone()).await?, None);
        assert!(store.get_product(id).await?.is_none());

        Ok(())
    }
}
