//! App Router

use salvo::Router;

use crate::products;

/// Product routes under `/api/products`.
///
/// Only the write routes pass through the write gate.
pub(crate) fn products_router() -> Router {
    Router::with_path("api/products")
        .get(products::index::handler)
        .push(
            Router::new()
                .hoop(products::write_gate)
                .post(products::create::handler),
        )
        .push(
            Router::with_path("{id}")
                .get(products::get::handler)
                .push(
                    Router::new()
                        .hoop(products::write_gate)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use testresult::TestResult;

    use catalog_app::{context::AppContext, stores::MemoryProductsStore};

    use crate::{state::State, test_helpers::valid_body};

    use super::*;

    fn memory_service() -> Service {
        let app = AppContext::new("memory", Arc::new(MemoryProductsStore::new()));

        Service::new(
            Router::new()
                .hoop(inject(State::from_app_context(app)))
                .push(products_router()),
        )
    }

    fn id_of(body: &Value, key: &str) -> String {
        body.get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_product_lifecycle_against_memory_store() -> TestResult {
        let service = memory_service();

        let mut res = TestClient::post("http://example.com/api/products")
            .json(&valid_body(json!(true)))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let id = id_of(&res.take_json().await?, "savedProductId");

        let mut res = TestClient::get(format!("http://example.com/api/products/{id}"))
            .send(&service)
            .await;

        let product: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(product.get("id"), Some(&json!(id)));
        assert_eq!(product.get("name"), Some(&json!("A")));
        assert_eq!(product.get("stock"), Some(&json!(5)));
        assert!(product.get("timestamp").is_some(), "timestamp missing");
        assert!(product.get("admin").is_none(), "admin was persisted");

        let mut updated = valid_body(json!(true));
        updated["name"] = json!("B");

        let mut res = TestClient::put(format!("http://example.com/api/products/{id}"))
            .json(&updated)
            .send(&service)
            .await;

        assert_eq!(id_of(&res.take_json().await?, "updatedProductId"), id);

        let mut res = TestClient::get("http://example.com/api/products")
            .send(&service)
            .await;

        let list: Value = res.take_json().await?;

        assert_eq!(list.pointer("/products/0/name"), Some(&json!("B")));

        let mut res = TestClient::delete(format!("http://example.com/api/products/{id}"))
            .json(&json!({ "admin": true }))
            .send(&service)
            .await;

        assert_eq!(id_of(&res.take_json().await?, "deletedProductId"), id);

        let mut res = TestClient::delete(format!("http://example.com/api/products/{id}"))
            .json(&json!({ "admin": true }))
            .send(&service)
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.get("error"), Some(&json!(-4)));

        Ok(())
    }

    #[tokio::test]
    async fn test_reads_do_not_require_admin() -> TestResult {
        let service = memory_service();

        let res = TestClient::get("http://example.com/api/products")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let res = TestClient::get("http://example.com/api/products/1")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_admin_update_of_existing_product_is_rejected() -> TestResult {
        let service = memory_service();

        let mut res = TestClient::post("http://example.com/api/products")
            .json(&valid_body(json!(true)))
            .send(&service)
            .await;

        let id = id_of(&res.take_json().await?, "savedProductId");

        let mut res = TestClient::put(format!("http://example.com/api/products/{id}"))
            .json(&valid_body(json!(false)))
            .send(&service)
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert_eq!(body.get("error"), Some(&json!(-1)));

        Ok(())
    }
}
