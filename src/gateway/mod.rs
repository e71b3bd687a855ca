//! Gateway Aggregator service
//!
//! ```text
//! GET /api/products            gateway work + product backend
//! GET /api/orders              gateway work + order backend
//! GET /api/summary             gateway work + products + orders (sequential)
//! GET /api/summary/concurrent  same, both backend calls in flight together
//! GET /api/health
//! GET /docs                    Swagger UI
//! ```

pub mod client;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod service;
pub mod state;

use std::sync::Arc;

use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use client::{HttpOrderClient, HttpProductClient, OrderApi, ProductApi, UpstreamError};
pub use error::GatewayError;
pub use service::GatewayService;
pub use state::AppState;

pub const SERVICE_NAME: &str = "gateway";

/// Build the gateway router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/products", get(handlers::get_products))
        .route("/api/orders", get(handlers::get_orders))
        .route("/api/summary", get(handlers::get_summary))
        .route(
            "/api/summary/concurrent",
            get(handlers::get_summary_concurrent),
        )
        .route("/api/health", get(handlers::health_check))
        .with_state(state)
        // stateless, added after with_state
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}
