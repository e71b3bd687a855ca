use std::sync::Arc;

use axum::{Json, extract::State};

use crate::extract::{IdPath, LoadQuery};
use crate::models::Order;

use super::service::OrderService;

/// GET /orders?work=&tailEvery=&tailExtra=
pub async fn list_orders(
    State(service): State<Arc<OrderService>>,
    LoadQuery(params): LoadQuery,
) -> Json<Vec<Order>> {
    tracing::debug!(?params, "list orders");
    Json(service.list(&params))
}

/// GET /orders/{id}?work=&tailEvery=&tailExtra=
pub async fn get_order(
    State(service): State<Arc<OrderService>>,
    IdPath(id): IdPath,
    LoadQuery(params): LoadQuery,
) -> Json<Order> {
    tracing::debug!(id, ?params, "get order");
    Json(service.get_by_id(id, &params))
}
