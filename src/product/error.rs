use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::{ApiResponse, error_codes};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    #[error("Product {0} not found")]
    NotFound(u64),

    /// The highest stored id is `u64::MAX`, so `max + 1` has nowhere to go.
    #[error("No product id left to assign after {0}")]
    IdSpaceExhausted(u64),
}

impl ProductError {
    pub fn code(&self) -> i32 {
        match self {
            ProductError::NotFound(_) => error_codes::PRODUCT_NOT_FOUND,
            ProductError::IdSpaceExhausted(_) => error_codes::ID_SPACE_EXHAUSTED,
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            ProductError::NotFound(_) => StatusCode::NOT_FOUND,
            ProductError::IdSpaceExhausted(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::<()>::error(self.code(), self.to_string()));
        (self.http_status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_code_mapping() {
        let missing = ProductError::NotFound(9);
        assert_eq!(missing.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.code(), 4001);

        let full = ProductError::IdSpaceExhausted(u64::MAX);
        assert_eq!(full.http_status(), StatusCode::CONFLICT);
        assert_eq!(full.code(), 4002);
        assert_eq!(
            full.to_string(),
            "No product id left to assign after 18446744073709551615"
        );
    }
}
