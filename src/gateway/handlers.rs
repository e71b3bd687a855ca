use std::sync::Arc;

use axum::{Json, extract::State};

use crate::extract::LoadQuery;
use crate::models::{AggregatedSummary, Order, Product};
use crate::response::{ApiResponse, HealthResponse};
use crate::work_simulator::LoadParams;

use super::error::GatewayError;
use super::state::AppState;

/// List products through the gateway
///
/// Applies gateway-local load, then forwards the same parameters to the
/// product service.
#[utoipa::path(
    get,
    path = "/api/products",
    params(LoadParams),
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 400, description = "Invalid load parameters"),
        (status = 502, description = "Product service failed")
    ),
    tag = "Gateway"
)]
pub async fn get_products(
    State(state): State<Arc<AppState>>,
    LoadQuery(params): LoadQuery,
) -> Result<Json<Vec<Product>>, GatewayError> {
    tracing::debug!(?params, "gateway products");
    state.gateway.products(&params).await.map(Json)
}

/// List orders through the gateway
#[utoipa::path(
    get,
    path = "/api/orders",
    params(LoadParams),
    responses(
        (status = 200, description = "All orders", body = Vec<Order>),
        (status = 400, description = "Invalid load parameters"),
        (status = 502, description = "Order service failed")
    ),
    tag = "Gateway"
)]
pub async fn get_orders(
    State(state): State<Arc<AppState>>,
    LoadQuery(params): LoadQuery,
) -> Result<Json<Vec<Order>>, GatewayError> {
    tracing::debug!(?params, "gateway orders");
    state.gateway.orders(&params).await.map(Json)
}

/// Aggregate products and orders
///
/// Calls the product service, then the order service (sequentially). Any
/// upstream failure fails the whole request.
#[utoipa::path(
    get,
    path = "/api/summary",
    params(LoadParams),
    responses(
        (status = 200, description = "Combined summary", body = AggregatedSummary),
        (status = 400, description = "Invalid load parameters"),
        (status = 502, description = "A backend failed"),
        (status = 504, description = "A backend timed out")
    ),
    tag = "Gateway"
)]
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    LoadQuery(params): LoadQuery,
) -> Result<Json<AggregatedSummary>, GatewayError> {
    tracing::debug!(?params, "gateway summary");
    state.gateway.summary(&params).await.map(Json)
}

/// Aggregate with both backend calls in flight together
#[utoipa::path(
    get,
    path = "/api/summary/concurrent",
    params(LoadParams),
    responses(
        (status = 200, description = "Combined summary", body = AggregatedSummary),
        (status = 400, description = "Invalid load parameters"),
        (status = 502, description = "A backend failed"),
        (status = 504, description = "A backend timed out")
    ),
    tag = "Gateway"
)]
pub async fn get_summary_concurrent(
    State(state): State<Arc<AppState>>,
    LoadQuery(params): LoadQuery,
) -> Result<Json<AggregatedSummary>, GatewayError> {
    tracing::debug!(?params, "gateway summary (concurrent)");
    state.gateway.summary_concurrent(&params).await.map(Json)
}

/// Gateway liveness
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Gateway is up", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    crate::response::health(super::SERVICE_NAME).await
}
