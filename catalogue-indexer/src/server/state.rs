//! Shared state for the HTTP handlers.

use std::sync::Arc;

use catalogue_indexer_repository::IndexStoreService;

#[derive(Clone)]
pub struct AppState {
    pub index_store: Arc<IndexStoreService>,
}

impl AppState {
    pub fn new(index_store: Arc<IndexStoreService>) -> Self {
        Self { index_store }
    }
}
