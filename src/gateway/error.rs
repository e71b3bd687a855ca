//! Gateway error type
//!
//! Any backend failure fails the whole gateway request: no partial summary,
//! no fallback values. The upstream cause is carried through to the body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response::{ApiResponse, error_codes};

use super::client::UpstreamError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl GatewayError {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Upstream(UpstreamError::Transport { source, .. }) if source.is_timeout() => {
                StatusCode::GATEWAY_TIMEOUT
            }
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Upstream(_) => error_codes::UPSTREAM_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::error!("[GATEWAY] {}", self);
        let body = ApiResponse::<()>::error(self.code(), self.to_string());
        (self.http_status(), Json(body)).into_response()
    }
}
