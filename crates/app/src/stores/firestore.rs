//! Firestore products store over the REST API.

use async_trait::async_trait;
use jiff::Timestamp;
use reqwest::{Client, IntoUrl, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::{Map, Number, Value, json};
use tracing::info;

use crate::products::{
    ProductsStore, StoreError,
    models::{Product, ProductData, ProductId},
};

use super::ConnectMode;

const PAGE_SIZE: u32 = 300;

/// Configuration for a Firestore project.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// API root, e.g. `"https://firestore.googleapis.com/v1"` or an emulator.
    pub base_url: String,

    /// Google Cloud project id.
    pub project_id: String,

    /// Collection holding product documents.
    pub collection: String,

    /// OAuth access token sent as a bearer token. Emulators need none.
    pub token: Option<String>,

    pub mode: ConnectMode,
}

/// Products stored as Firestore documents with auto-generated ids.
#[derive(Debug, Clone)]
pub struct FirestoreProductsStore {
    config: FirestoreConfig,
    http: Client,
}

impl FirestoreProductsStore {
    /// Build a store for the configured collection.
    ///
    /// In [`ConnectMode::Eager`] a one-document listing is requested to prove
    /// the project and credentials work.
    ///
    /// # Errors
    ///
    /// Returns an error when the eager connectivity check fails.
    pub async fn connect(config: FirestoreConfig) -> Result<Self, StoreError> {
        let store = Self {
            config,
            http: Client::new(),
        };

        if store.config.mode == ConnectMode::Eager {
            let response = store
                .request(Method::GET, store.collection_url())
                .query(&[("pageSize", "1")])
                .send()
                .await?;

            ensure_success(response, "connect").await?;

            info!(project = %store.config.project_id, "connected to firestore");
        }

        Ok(store)
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id,
            self.config.collection
        )
    }

    /// `None` for ids that cannot name a document in this collection.
    ///
    /// The id is appended as a single percent-encoded path segment.
    fn document_url(&self, id: &ProductId) -> Option<Url> {
        let id = id.as_str();

        if matches!(id, "" | "." | "..") || id.contains('/') {
            return None;
        }

        let mut url = Url::parse(&self.collection_url()).ok()?;
        url.path_segments_mut().ok()?.push(id);

        Some(url)
    }

    fn request(&self, method: Method, url: impl IntoUrl) -> RequestBuilder {
        let builder = self.http.request(method, url);

        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl ProductsStore for FirestoreProductsStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let mut products = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .request(Method::GET, self.collection_url())
                .query(&[("pageSize", PAGE_SIZE)]);

            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let page: ListDocumentsResponse = ensure_success(request.send().await?, "list")
                .await?
                .json()
                .await?;

            for document in page.documents {
                products.push(document.try_into()?);
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let Some(url) = self.document_url(&id) else {
            return Ok(None);
        };

        let response = self.request(Method::GET, url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document: Document = ensure_success(response, "get").await?.json().await?;

        Ok(Some(document.try_into()?))
    }

    async fn save_product(&self, product: ProductData) -> Result<ProductId, StoreError> {
        let response = self
            .request(Method::POST, self.collection_url())
            .json(&json!({ "fields": encode_fields(&product) }))
            .send()
            .await?;

        let document: Document = ensure_success(response, "create").await?.json().await?;

        document.id()
    }

    async fn update_product(
        &self,
        id: ProductId,
        product: ProductData,
    ) -> Result<Option<ProductId>, StoreError> {
        let Some(url) = self.document_url(&id) else {
            return Ok(None);
        };

        // Without an update mask the PATCH replaces every field; the
        // precondition stops it from creating a missing document.
        let response = self
            .request(Method::PATCH, url)
            .query(&[("currentDocument.exists", "true")])
            .json(&json!({ "fields": encode_fields(&product) }))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        ensure_success(response, "update").await?;

        Ok(Some(id))
    }

    async fn delete_product(&self, id: ProductId) -> Result<Option<ProductId>, StoreError> {
        let Some(url) = self.document_url(&id) else {
            return Ok(None);
        };

        let response = self
            .request(Method::DELETE, url)
            .query(&[("currentDocument.exists", "true")])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        ensure_success(response, "delete").await?;

        Ok(Some(id))
    }
}

async fn ensure_success(response: Response, operation: &str) -> Result<Response, StoreError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    Err(StoreError::UnexpectedResponse(format!(
        "{operation} request failed with status {status}: {text}"
    )))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Document {
    /// Full resource name; the document id is its last segment.
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl Document {
    fn id(&self) -> Result<ProductId, StoreError> {
        self.name
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .map(ProductId::from)
            .ok_or_else(|| StoreError::InvalidDocument(format!("bad name {:?}", self.name)))
    }
}

impl TryFrom<Document> for Product {
    type Error = StoreError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        let id = document.id()?;
        let fields = &document.fields;

        Ok(Product::new(
            id,
            ProductData {
                name: string_field(fields, "name")?,
                description: string_field(fields, "description")?,
                code: string_field(fields, "code")?,
                url: string_field(fields, "url")?,
                price: number_field(fields, "price")?,
                stock: number_field(fields, "stock")?,
                timestamp: timestamp_field(fields, "timestamp")?,
            },
        ))
    }
}

fn encode_fields(product: &ProductData) -> Value {
    json!({
        "name": { "stringValue": product.name },
        "description": { "stringValue": product.description },
        "code": { "stringValue": product.code },
        "url": { "stringValue": product.url },
        "price": encode_number(&product.price),
        "stock": encode_number(&product.stock),
        "timestamp": { "timestampValue": product.timestamp.to_string() },
    })
}

/// Integral numbers become `integerValue` (a decimal string), anything else
/// `doubleValue`.
fn encode_number(number: &Number) -> Value {
    if number.is_i64() || number.is_u64() {
        json!({ "integerValue": number.to_string() })
    } else {
        json!({ "doubleValue": number })
    }
}

fn typed_value<'a>(fields: &'a Map<String, Value>, key: &str, kind: &str) -> Option<&'a Value> {
    fields.get(key).and_then(|value| value.get(kind))
}

fn missing(key: &str) -> StoreError {
    StoreError::InvalidDocument(format!("field {key:?} is missing or mistyped"))
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Result<String, StoreError> {
    typed_value(fields, key, "stringValue")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| missing(key))
}

/// Firestore sends 64-bit integers as strings.
fn parse_integer(value: &Value) -> Option<Number> {
    match value {
        Value::String(text) => text.parse::<i64>().ok().map(Number::from),
        Value::Number(number) if number.is_i64() => Some(number.clone()),
        _ => None,
    }
}

fn number_field(fields: &Map<String, Value>, key: &str) -> Result<Number, StoreError> {
    typed_value(fields, key, "integerValue")
        .and_then(parse_integer)
        .or_else(|| {
            typed_value(fields, key, "doubleValue")
                .and_then(Value::as_f64)
                .and_then(Number::from_f64)
        })
        .ok_or_else(|| missing(key))
}

fn timestamp_field(fields: &Map<String, Value>, key: &str) -> Result<Timestamp, StoreError> {
    typed_value(fields, key, "timestampValue")
        .and_then(Value::as_str)
        .and_then(|text| text.parse::<Timestamp>().ok())
        .ok_or_else(|| missing(key))
}
