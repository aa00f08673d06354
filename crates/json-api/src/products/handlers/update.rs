//! Update Product Handler

use std::sync::Arc;

use salvo::{
    http::Method,
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use catalog_app::products::models::ProductId;

use crate::{
    extensions::*,
    products::{ApiError, handlers::authorized_product},
    state::State,
};

/// Product Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductUpdatedResponse {
    pub updated_product_id: String,
}

/// Update Product Handler
///
/// Replaces every field of an existing product and refreshes its timestamp.
#[endpoint(tags("products"), summary = "Update Product")]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductUpdatedResponse>, ApiError> {
    let product = authorized_product(
        depot,
        Method::PUT,
        "Product to update has an invalid format.",
    )?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let id = state
        .app
        .products
        .update_product(ProductId::from(id.into_inner()), product)
        .await?
        .ok_or(ApiError::NotFound("Product not found. Could not update."))?;

    Ok(Json(ProductUpdatedResponse {
        updated_product_id: id.into_string(),
    }))
}
