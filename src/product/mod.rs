//! Product backend service
//!
//! ```text
//! GET  /products        list (load-injected)
//! GET  /products/{id}   get or 404 (load-injected)
//! POST /products        upsert, id assigned when absent (409 once ids run out)
//! GET  /health
//! ```

pub mod error;
pub mod handlers;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::{Router, routing::get};

pub use error::ProductError;
pub use service::ProductService;
pub use store::ProductStore;

pub const SERVICE_NAME: &str = "product";

/// Build the product service router
pub fn router(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/products",
            get(handlers::list_products).post(handlers::upsert_product),
        )
        .route("/products/{id}", get(handlers::get_product))
        .route("/health", get(|| crate::response::health(SERVICE_NAME)))
        .with_state(service)
}
