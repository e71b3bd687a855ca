//! Product backend: load preamble + store lookup

use std::sync::Arc;

use crate::models::{Product, ProductDraft};
use crate::work_simulator::{LoadParams, WorkSimulator};

use super::error::ProductError;
use super::store::ProductStore;

/// Product service state (shared)
pub struct ProductService {
    store: Arc<ProductStore>,
    work: WorkSimulator,
}

impl ProductService {
    pub fn new(store: Arc<ProductStore>) -> Self {
        Self {
            store,
            work: WorkSimulator::new(),
        }
    }

    /// Service over the three-item demo catalog
    pub fn seeded() -> Self {
        Self::new(Arc::new(ProductStore::seeded()))
    }

    pub fn list(&self, params: &LoadParams) -> Vec<Product> {
        self.work.apply(params);
        self.store.all()
    }

    /// `None` when the id is not in the store
    pub fn get_by_id(&self, id: u64, params: &LoadParams) -> Option<Product> {
        self.work.apply(params);
        self.store.get(id)
    }

    /// Plain write path, no load injection.
    pub fn upsert(&self, draft: ProductDraft) -> Result<Product, ProductError> {
        self.store.upsert(draft)
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    pub fn work(&self) -> &WorkSimulator {
        &self.work
    }
}
