use std::sync::Arc;

use axum::{Json, extract::State};

use crate::extract::{IdPath, JsonBody, LoadQuery};
use crate::models::{Product, ProductDraft};

use super::error::ProductError;
use super::service::ProductService;

/// GET /products?work=&tailEvery=&tailExtra=
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
    LoadQuery(params): LoadQuery,
) -> Json<Vec<Product>> {
    tracing::debug!(?params, "list products");
    Json(service.list(&params))
}

/// GET /products/{id}?work=&tailEvery=&tailExtra=
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    IdPath(id): IdPath,
    LoadQuery(params): LoadQuery,
) -> Result<Json<Product>, ProductError> {
    tracing::debug!(id, ?params, "get product");
    service
        .get_by_id(id, &params)
        .map(Json)
        .ok_or(ProductError::NotFound(id))
}

/// POST /products
pub async fn upsert_product(
    State(service): State<Arc<ProductService>>,
    JsonBody(draft): JsonBody<ProductDraft>,
) -> Result<Json<Product>, ProductError> {
    let stored = service.upsert(draft).inspect_err(|e| {
        tracing::warn!(error = %e, "product upsert refused");
    })?;
    tracing::info!(id = stored.id, name = %stored.name, "product upserted");
    Ok(Json(stored))
}
