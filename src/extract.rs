//! Request extractors that reject with the `ApiResponse` envelope
//!
//! Axum's stock `Query` / `Path` / `Json` rejections answer in plain text.
//! These wrappers keep the rejection status but put the message in an
//! `INVALID_PARAMETER` body, so every service fails bad input the same way.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::response::{ApiResponse, error_codes};
use crate::work_simulator::LoadParams;

/// Rejection shared by all extractors in this module
#[derive(Debug)]
pub struct ParamRejection {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ParamRejection {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status, msg = %self.message, "request rejected");
        let body = Json(ApiResponse::<()>::error(
            error_codes::INVALID_PARAMETER,
            self.message,
        ));
        (self.status, body).into_response()
    }
}

/// `?work=&tailEvery=&tailExtra=`
#[derive(Debug)]
pub struct LoadQuery(pub LoadParams);

impl<S> FromRequestParts<S> for LoadQuery
where
    S: Send + Sync,
{
    type Rejection = ParamRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<LoadParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ParamRejection {
                status: e.status(),
                message: e.body_text(),
            })?;
        Ok(LoadQuery(params))
    }
}

/// Single numeric id segment, e.g. `/products/{id}`
#[derive(Debug)]
pub struct IdPath(pub u64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ParamRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<u64>::from_request_parts(parts, state)
            .await
            .map_err(|e| ParamRejection {
                status: e.status(),
                message: e.body_text(),
            })?;
        Ok(IdPath(id))
    }
}

/// JSON request body
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ParamRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ParamRejection {
                status: e.status(),
                message: e.body_text(),
            })?;
        Ok(JsonBody(value))
    }
}
