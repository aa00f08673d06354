//! Get Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use catalog_app::products::models::ProductId;

use crate::{
    extensions::*,
    products::{ApiError, ProductResponse},
    state::State,
};

/// Get Product Handler
///
/// Returns a single product.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(ProductId::from(id.into_inner()))
        .await?
        .ok_or(ApiError::NotFound("Product not found."))?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use catalog_app::products::{MockProductsStore, models::Product};

    use crate::{
        products::ErrorBody,
        test_helpers::{product_data, products_service},
    };

    use super::*;

    fn expect_only_get(store: &mut MockProductsStore) {
        store.expect_list_products().never();
        store.expect_save_product().never();
        store.expect_update_product().never();
        store.expect_delete_product().never();
    }

    #[tokio::test]
    async fn test_get_returns_product() -> TestResult {
        let mut store = MockProductsStore::new();

        store
            .expect_get_product()
            .once()
            .withf(|id| *id == ProductId::from("7"))
            .return_once(|id| Ok(Some(Product::new(id, product_data("A")))));

        expect_only_get(&mut store);

        let mut res = TestClient::get("http://example.com/api/products/7")
            .send(&products_service(store))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body,
            ProductResponse::from(Product::new(ProductId::from("7"), product_data("A")))
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() -> TestResult {
        let mut store = MockProductsStore::new();

        store
            .expect_get_product()
            .once()
            .return_once(|_| Ok(None));

        expect_only_get(&mut store);

        let mut res = TestClient::get("http://example.com/api/products/nope")
            .send(&products_service(store))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.error, -4);
        assert_eq!(body.description, "Product not found.");

        Ok(())
    }
}
