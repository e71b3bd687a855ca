//! API response envelope and error codes
//!
//! - `ApiResponse<T>`: envelope for error bodies and the health endpoints
//! - `error_codes`: numeric codes shared by all three services
//! - `health`: the `/health` handler every service mounts
//!
//! Successful data endpoints return their payload directly (a list, a product,
//! a summary) so the gateway can relay backend bodies unchanged.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unified API response wrapper
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: payload on success, omitted on error
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    #[schema(example = 0)]
    pub code: i32,
    #[schema(example = "ok")]
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Standard API error codes
pub mod error_codes {
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;

    // Resource errors (4xxx)
    pub const PRODUCT_NOT_FOUND: i32 = 4001;
    pub const ID_SPACE_EXHAUSTED: i32 = 4002;

    // Server errors (5xxx)
    pub const UPSTREAM_ERROR: i32 = 5002;
}

// ============================================================================
// Health
// ============================================================================

/// Health check payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "gateway")]
    pub service: String,
    /// Short git hash the binary was built from
    #[schema(example = "a1b2c3d")]
    pub build: String,
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
}

/// Liveness probe shared by product, order and gateway.
pub async fn health(service: &'static str) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        service: service.to_string(),
        build: env!("GIT_HASH").to_string(),
        timestamp_ms: now_ms(),
    }))
}

/// Current wall-clock time in milliseconds
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_omits_data() {
        let body = ApiResponse::<()>::error(error_codes::PRODUCT_NOT_FOUND, "Product 9 not found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], 4001);
        assert_eq!(json["msg"], "Product 9 not found");
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn test_health_reports_service_name() {
        let Json(body) = health("order").await;
        assert_eq!(body.code, error_codes::SUCCESS);
        let data = body.data.unwrap();
        assert_eq!(data.service, "order");
        assert!(data.timestamp_ms > 0);
    }
}
