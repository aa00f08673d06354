//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// Service status
    pub status: String,

    /// Active products store
    pub persistence: String,
}

/// Healthcheck handler
///
/// Reports liveness and which products store was selected at startup. The
/// store itself is not contacted.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        persistence: state.app.persistence.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use catalog_app::{context::AppContext, stores::MemoryProductsStore};

    use super::*;

    #[tokio::test]
    async fn test_healthcheck_reports_persistence() -> TestResult {
        let app = AppContext::new("memory", Arc::new(MemoryProductsStore::new()));

        let router = Router::new()
            .hoop(inject(State::from_app_context(app)))
            .push(Router::with_path("healthcheck").get(handler));

        let response: HealthResponse = TestClient::get("http://example.com/healthcheck")
            .send(&Service::new(router))
            .await
            .take_json()
            .await?;

        assert_eq!(response.status, "ok");
        assert_eq!(response.persistence, "memory");

        Ok(())
    }
}
