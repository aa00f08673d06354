//! Create Product Handler

use std::sync::Arc;

use salvo::{http::Method, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::{ApiError, handlers::authorized_product},
    state::State,
};

/// Product Saved Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductSavedResponse {
    /// Identifier assigned by the store
    pub saved_product_id: String,
}

/// Create Product Handler
///
/// Requires a truthy `admin` field alongside the product fields.
#[endpoint(tags("products"), summary = "Create Product")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductSavedResponse>, ApiError> {
    let product = authorized_product(
        depot,
        Method::POST,
        "Product to create has an invalid format.",
    )?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let id = state.app.products.save_product(product).await?;

    Ok(Json(ProductSavedResponse {
        saved_product_id: id.into_string(),
    }))
}
