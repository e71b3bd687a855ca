//! Shared data types: Product, Order, AggregatedSummary
//!
//! Prices and totals use `rust_decimal::Decimal`, serialized as JSON strings
//! so they survive the service-to-gateway hop without float rounding.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Product
// ============================================================================

/// Catalog entry owned by the product service store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Laptop")]
    pub name: String,
    #[schema(example = "Simple laptop")]
    pub description: String,
    #[schema(value_type = String, example = "799.99")]
    pub price: Decimal,
    #[schema(example = 10)]
    pub stock: i64,
}

impl Product {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        stock: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            stock,
        }
    }
}

/// Upsert payload: a product whose id may still be unassigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductDraft {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            price,
            stock: 0,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Resolve into a stored product under `id`
    pub fn into_product(self, id: u64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
        }
    }
}

// ============================================================================
// Order
// ============================================================================

/// Order lifecycle states that appear in the fixture data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Created,
    Paid,
    Shipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Sara")]
    pub customer: String,
    #[schema(value_type = String, example = "499.50")]
    pub total: Decimal,
    pub status: OrderStatus,
}

impl Order {
    pub fn new(id: u64, customer: impl Into<String>, total: Decimal, status: OrderStatus) -> Self {
        Self {
            id,
            customer: customer.into(),
            total,
            status,
        }
    }
}

// ============================================================================
// AggregatedSummary
// ============================================================================

/// Gateway `/api/summary` body. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedSummary {
    #[schema(example = 3)]
    pub product_count: usize,
    #[schema(example = 3)]
    pub order_count: usize,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

impl AggregatedSummary {
    pub fn new(products: Vec<Product>, orders: Vec<Order>) -> Self {
        Self {
            product_count: products.len(),
            order_count: orders.len(),
            products,
            orders,
        }
    }
}
