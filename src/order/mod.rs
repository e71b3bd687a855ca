//! Order backend service
//!
//! ```text
//! GET /orders        fixture list (load-injected)
//! GET /orders/{id}   placeholder order for any id (load-injected)
//! GET /health
//! ```

pub mod handlers;
pub mod service;

use std::sync::Arc;

use axum::{Router, routing::get};

pub use service::OrderService;

pub const SERVICE_NAME: &str = "order";

/// Build the order service router
pub fn router(service: Arc<OrderService>) -> Router {
    Router::new()
        .route("/orders", get(handlers::list_orders))
        .route("/orders/{id}", get(handlers::get_order))
        .route("/health", get(|| crate::response::health(SERVICE_NAME)))
        .with_state(service)
}
