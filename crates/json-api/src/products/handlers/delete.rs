//! Delete Product Handler

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
    products::{ApiError, handlers::authorize},
    state::State,
};

/// Product Deleted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductDeletedResponse {
    pub deleted_product_id: String,
}

/// Delete Product Handler
///
/// Only the `admin` field of the body is consulted.
#[endpoint(tags("products"), summary = "Delete Product")]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductDeletedResponse>, ApiError> {
    authorize(depot, Method::DELETE)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let id = state
        .app
        .products
        .delete_product(ProductId::from(id.into_inner()))
        .await?
        .ok_or(ApiError::NotFound("Product not found. Could not delete."))?;

    Ok(Json(ProductDeletedResponse {
        deleted_product_id: id.into_string(),
    }))
}
