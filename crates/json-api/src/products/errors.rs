//! Product route errors.
//!
//! Gate and lookup failures are rendered as `{ "error": <code>, "description": <text> }`.
//! Store failures are rendered as their plain error text.

use salvo::{
    async_trait,
    http::{Method, StatusCode, StatusError},
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::{Depot, Json, Request, Response, Text, Writer},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use catalog_app::products::StoreError;

/// Error envelope for product routes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorBody {
    /// Negative error code: `-1` not authorized, `-3` invalid product, `-4` not found.
    pub error: i32,

    pub description: String,
}

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("Route: /api/products method: {0} not authorized.")]
    Unauthorized(Method),

    #[error("{0}")]
    InvalidProduct(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Status(#[from] StatusError),
}

impl ApiError {
    fn code(&self) -> Option<(StatusCode, i32)> {
        match self {
            Self::Unauthorized(_) => Some((StatusCode::FORBIDDEN, -1)),
            Self::InvalidProduct(_) => Some((StatusCode::BAD_REQUEST, -3)),
            Self::NotFound(_) => Some((StatusCode::NOT_FOUND, -4)),
            Self::Store(_) | Self::Status(_) => None,
        }
    }
}

#[async_trait]
impl Writer for ApiError {
    async fn write(self, _req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        if let Some((status, error)) = self.code() {
            res.status_code(status);
            res.render(Json(ErrorBody {
                error,
                description: self.to_string(),
            }));

            return;
        }

        match self {
            Self::Store(source) => {
                warn!("products store request failed: {source}");

                res.status_code(StatusCode::BAD_REQUEST);
                res.render(Text::Plain(source.to_string()));
            }
            Self::Status(status) => {
                res.status_code(status.code);
            }
            Self::Unauthorized(_) | Self::InvalidProduct(_) | Self::NotFound(_) => {}
        }
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Invalid product or store failure"),
            (StatusCode::FORBIDDEN, "Not authorized"),
            (StatusCode::NOT_FOUND, "Product not found"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description).add_content(
                    "application/json",
                    oapi::Content::new(ErrorBody::to_schema(components)),
                ),
            );
        }
    }
}
