//! In-memory product store
//!
//! Reads go straight to a `DashMap`. Upserts additionally take `assign_lock`
//! so that "compute max id + 1, then insert" is one step with respect to
//! every other upsert.

use std::sync::Mutex;

use dashmap::DashMap;
use rust_decimal::Decimal;

use crate::models::{Product, ProductDraft};

use super::error::ProductError;

pub struct ProductStore {
    products: DashMap<u64, Product>,
    /// Serializes upserts; readers never take it
    assign_lock: Mutex<()>,
}

impl ProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
            assign_lock: Mutex::new(()),
        }
    }

    /// Create a store holding `products`, keyed by their ids.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let store = Self::new();
        for p in products {
            store.products.insert(p.id, p);
        }
        store
    }

    /// The demo catalog: Laptop, Phone, Headphones (ids 1-3).
    pub fn seeded() -> Self {
        Self::with_products([
            Product::new(1, "Laptop", "Simple laptop", Decimal::new(79999, 2), 10),
            Product::new(2, "Phone", "Smartphone", Decimal::new(49999, 2), 25),
            Product::new(
                3,
                "Headphones",
                "Wireless headphones",
                Decimal::new(9999, 2),
                50,
            ),
        ])
    }

    pub fn get(&self, id: u64) -> Option<Product> {
        self.products.get(&id).map(|entry| entry.value().clone())
    }

    /// All products in ascending id order.
    pub fn all(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        products.sort_by_key(|p| p.id);
        products
    }

    /// Insert or overwrite. A draft without id gets `max(ids) + 1`, or 1 when empty.
    ///
    /// Fails without touching the store when `max(ids)` is already `u64::MAX`.
    pub fn upsert(&self, draft: ProductDraft) -> Result<Product, ProductError> {
        let _guard = self.assign_lock.lock().unwrap_or_else(|e| e.into_inner());

        let id = match draft.id {
            Some(id) => id,
            None => self.next_id()?,
        };
        let product = draft.into_product(id);
        self.products.insert(id, product.clone());
        Ok(product)
    }

    fn next_id(&self) -> Result<u64, ProductError> {
        let max = self
            .products
            .iter()
            .map(|entry| *entry.key())
            .max()
            .unwrap_or(0);
        max.checked_add(1)
            .ok_or(ProductError::IdSpaceExhausted(max))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}
