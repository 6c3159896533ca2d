//! # Catalogue Indexer Repository
//!
//! This crate provides traits and implementations for interacting with the
//! index store. It includes definitions for errors, interfaces, and a
//! concrete implementation for OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod service;
pub mod types;
pub mod utils;

pub use config::IndexStoreServiceConfig;
pub use errors::IndexStoreError;
pub use interfaces::IndexStoreProvider;
pub use opensearch::OpenSearchProvider;
pub use service::IndexStoreService;
pub use types::{BatchOperationResult, BatchOperationSummary, IndexDocument};
pub use utils::{validate_document_id, validate_index_name};
