//! Product Handlers

use jiff::Timestamp;
use salvo::{http::Method, oapi::ToSchema, prelude::Depot};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use catalog_app::products::models::{Product, ProductData};

use crate::{
    extensions::*,
    products::{ApiError, WriteGate},
};

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// Product as returned by the API.
#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Store-assigned identifier
    pub id: String,
    pub name: String,
    pub description: String,
    pub code: String,
    pub url: String,

    #[salvo(schema(value_type = f64))]
    pub price: Number,

    #[salvo(schema(value_type = f64))]
    pub stock: Number,

    /// RFC 3339 time of the last create or update
    pub timestamp: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let data = product.data;

        ProductResponse {
            id: product.id.into_string(),
            name: data.name,
            description: data.description,
            code: data.code,
            url: data.url,
            price: data.price,
            stock: data.stock,
            timestamp: data.timestamp.to_string(),
        }
    }
}

fn authorize(depot: &Depot, method: Method) -> Result<&WriteGate, ApiError> {
    let gate = depot.obtain_or_500::<WriteGate>()?;

    if gate.authorized {
        Ok(gate)
    } else {
        Err(ApiError::Unauthorized(method))
    }
}

/// Authorization is checked before the body shape.
fn authorized_product(
    depot: &Depot,
    method: Method,
    invalid: &'static str,
) -> Result<ProductData, ApiError> {
    let fields = authorize(depot, method)?
        .product
        .clone()
        .ok_or(ApiError::InvalidProduct(invalid))?;

    Ok(ProductData {
        name: fields.name,
        description: fields.description,
        code: fields.code,
        url: fields.url,
        price: fields.price,
        stock: fields.stock,
        timestamp: Timestamp::now(),
    })
}
