//! Index store provider trait definition.
//!
//! This module defines the abstract interface for index store operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use catalogue_indexer_shared::BooleanQuery;
use serde_json::Value;

use crate::errors::IndexStoreError;
use crate::types::{BatchOperationSummary, IndexDocument};

/// Abstracts the underlying document store (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are injected into `IndexStoreService` to enable dependency
/// injection and easy testing with mock implementations. Every method addresses
/// its target index by name.
///
/// All methods return `Result<T, IndexStoreError>` for consistent error handling
/// across different backend implementations.
#[async_trait]
pub trait IndexStoreProvider: Send + Sync {
    /// Check whether an index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, IndexStoreError>;

    /// Create an index.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the store acknowledged the creation
    /// * `Err(IndexStoreError::NotAcknowledged)` - If the request succeeded but was not acknowledged
    /// * `Err(IndexStoreError)` - If the request fails
    async fn create_index(&self, index: &str) -> Result<(), IndexStoreError>;

    /// Delete an index.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the store acknowledged the deletion
    /// * `Err(IndexStoreError::NotAcknowledged)` - If the request succeeded but was not acknowledged
    /// * `Err(IndexStoreError)` - If the request fails
    async fn delete_index(&self, index: &str) -> Result<(), IndexStoreError>;

    /// Create or replace a single document and wait until it is searchable.
    async fn upsert_document(
        &self,
        index: &str,
        document: &IndexDocument,
    ) -> Result<(), IndexStoreError>;

    /// Create or replace many documents in a single request.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Per-document outcomes; rejected documents are listed
    ///   there and do not fail the call
    /// * `Err(IndexStoreError)` - If the bulk request fails entirely
    async fn bulk_upsert_documents(
        &self,
        index: &str,
        documents: &[IndexDocument],
    ) -> Result<BatchOperationSummary, IndexStoreError>;

    /// Return the sources of every document matching the query.
    async fn search(&self, index: &str, query: &BooleanQuery)
        -> Result<Vec<Value>, IndexStoreError>;
}
