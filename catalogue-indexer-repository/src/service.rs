//! Index store service implementation.
//!
//! This module provides the main service for interacting with the index store.
//! Application code uses this to manage indices, write documents and search.

use catalogue_indexer_shared::BooleanQuery;
use serde_json::Value;
use tracing::debug;

use crate::config::IndexStoreServiceConfig;
use crate::errors::IndexStoreError;
use crate::interfaces::IndexStoreProvider;
use crate::types::{BatchOperationSummary, IndexDocument};
use crate::utils::{validate_document_id, validate_index_name};

/// The main service for interacting with the index store.
///
/// This is the high-level API that application code should use. It validates
/// index names and document IDs, splits bulk writes according to the
/// configuration, and delegates to an `IndexStoreProvider` for the actual
/// backend operations.
///
/// # Example
///
/// ```no_run
/// use catalogue_indexer_repository::{IndexDocument, IndexStoreService};
/// use catalogue_indexer_repository::opensearch::{IndexConfig, OpenSearchProvider};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = Box::new(
///     OpenSearchProvider::new("http://localhost:9200", None, IndexConfig::default()).await?,
/// );
/// let service = IndexStoreService::new(provider);
///
/// let document = IndexDocument::new("42", json!({ "id": "42", "name": "Shoe", "type": "product" }));
/// service.upsert("catalogue", document).await?;
/// # Ok(())
/// # }
/// ```
pub struct IndexStoreService {
    provider: Box<dyn IndexStoreProvider>,
    config: IndexStoreServiceConfig,
}

impl IndexStoreService {
    /// Create a new IndexStoreService with default configuration.
    ///
    /// # Arguments
    ///
    /// * `provider` - A boxed implementation of `IndexStoreProvider` (e.g., `OpenSearchProvider`)
    pub fn new(provider: Box<dyn IndexStoreProvider>) -> Self {
        Self {
            provider,
            config: IndexStoreServiceConfig::default(),
        }
    }

    /// Create a new IndexStoreService with custom configuration.
    pub fn with_config(
        provider: Box<dyn IndexStoreProvider>,
        config: IndexStoreServiceConfig,
    ) -> Self {
        Self { provider, config }
    }

    /// Check whether an index exists.
    pub async fn index_exists(&self, index: &str) -> Result<bool, IndexStoreError> {
        validate_index_name(index)?;
        self.provider.index_exists(index).await
    }

    /// Create an index.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was created and acknowledged
    /// * `Err(IndexStoreError::NotAcknowledged)` - If the store did not acknowledge the creation
    /// * `Err(IndexStoreError)` - If the operation fails
    pub async fn create_index(&self, index: &str) -> Result<(), IndexStoreError> {
        validate_index_name(index)?;
        self.provider.create_index(index).await
    }

    /// Delete an index.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was deleted and acknowledged
    /// * `Err(IndexStoreError::NotAcknowledged)` - If the store did not acknowledge the deletion
    /// * `Err(IndexStoreError)` - If the operation fails
    pub async fn delete_index(&self, index: &str) -> Result<(), IndexStoreError> {
        validate_index_name(index)?;
        self.provider.delete_index(index).await
    }

    /// Create or replace a single document.
    ///
    /// The call returns once the document is visible to searches.
    pub async fn upsert(
        &self,
        index: &str,
        document: IndexDocument,
    ) -> Result<(), IndexStoreError> {
        validate_index_name(index)?;
        validate_document_id(&document.id)?;
        self.provider.upsert_document(index, &document).await
    }

    /// Create or replace many documents and return a summary of successful and
    /// failed operations.
    ///
    /// All documents are sent in one bulk request unless `max_batch_size` is
    /// configured, in which case they are sent in consecutive chunks and the
    /// per-chunk summaries are merged. A chunk whose request fails entirely
    /// aborts the write; documents from earlier chunks stay indexed.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Per-document outcomes
    /// * `Err(IndexStoreError::ValidationError)` - If the index name or any document ID is invalid
    /// * `Err(IndexStoreError)` - If a bulk request fails entirely
    pub async fn bulk_upsert(
        &self,
        index: &str,
        documents: Vec<IndexDocument>,
    ) -> Result<BatchOperationSummary, IndexStoreError> {
        validate_index_name(index)?;

        if documents.is_empty() {
            return Ok(BatchOperationSummary::empty());
        }

        for document in &documents {
            validate_document_id(&document.id)?;
        }

        let chunk_size = self.config.max_batch_size.unwrap_or(documents.len());
        let mut summary = BatchOperationSummary::empty();

        for chunk in documents.chunks(chunk_size) {
            debug!(index = %index, count = chunk.len(), "Sending bulk request");
            let chunk_summary = self.provider.bulk_upsert_documents(index, chunk).await?;
            summary.merge(chunk_summary);
        }

        Ok(summary)
    }

    /// Return the sources of every document in `index` matching the query.
    pub async fn search(
        &self,
        index: &str,
        query: &BooleanQuery,
    ) -> Result<Vec<Value>, IndexStoreError> {
        validate_index_name(index)?;
        self.provider.search(index, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BatchOperationResult;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Mock provider for testing
    struct MockProvider {
        bulk_requests: Arc<Mutex<Vec<usize>>>,
        upserts: Arc<Mutex<Vec<IndexDocument>>>,
        reject_ids: Vec<String>,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                bulk_requests: Arc::new(Mutex::new(Vec::new())),
                upserts: Arc::new(Mutex::new(Vec::new())),
                reject_ids: Vec::new(),
            }
        }

        fn rejecting(ids: &[&str]) -> Self {
            Self {
                reject_ids: ids.iter().map(|id| id.to_string()).collect(),
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl IndexStoreProvider for MockProvider {
        async fn index_exists(&self, _index: &str) -> Result<bool, IndexStoreError> {
            Ok(true)
        }

        async fn create_index(&self, _index: &str) -> Result<(), IndexStoreError> {
            Ok(())
        }

        async fn delete_index(&self, _index: &str) -> Result<(), IndexStoreError> {
            Ok(())
        }

        async fn upsert_document(
            &self,
            _index: &str,
            document: &IndexDocument,
        ) -> Result<(), IndexStoreError> {
            self.upserts.lock().await.push(document.clone());
            Ok(())
        }

        async fn bulk_upsert_documents(
            &self,
            _index: &str,
            documents: &[IndexDocument],
        ) -> Result<BatchOperationSummary, IndexStoreError> {
            self.bulk_requests.lock().await.push(documents.len());
            let results = documents
                .iter()
                .map(|doc| {
                    if self.reject_ids.contains(&doc.id) {
                        BatchOperationResult::failed(&doc.id, IndexStoreError::index("rejected"))
                    } else {
                        BatchOperationResult::succeeded(&doc.id)
                    }
                })
                .collect();
            Ok(BatchOperationSummary::from_results(results))
        }

        async fn search(
            &self,
            _index: &str,
            _query: &BooleanQuery,
        ) -> Result<Vec<Value>, IndexStoreError> {
            Ok(vec![json!({ "id": "1" })])
        }
    }

    fn create_test_documents(count: usize) -> Vec<IndexDocument> {
        (0..count)
            .map(|i| IndexDocument::new(format!("doc-{}", i), json!({ "n": i })))
            .collect()
    }

    #[tokio::test]
    async fn test_bulk_upsert_empty() {
        let provider = MockProvider::new();
        let requests = provider.bulk_requests.clone();
        let service = IndexStoreService::new(Box::new(provider));

        let result = service.bulk_upsert("catalogue", vec![]).await.unwrap();

        assert_eq!(result.total, 0);
        assert!(result.results.is_empty());
        assert!(requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_bulk_upsert_single_request_by_default() {
        let provider = MockProvider::new();
        let requests = provider.bulk_requests.clone();
        let service = IndexStoreService::new(Box::new(provider));

        let result = service
            .bulk_upsert("catalogue", create_test_documents(2500))
            .await
            .unwrap();

        assert_eq!(result.total, 2500);
        assert_eq!(result.succeeded, 2500);
        assert_eq!(*requests.lock().await, vec![2500]);
    }

    #[tokio::test]
    async fn test_bulk_upsert_chunks_with_max_batch_size() {
        let provider = MockProvider::rejecting(&["doc-1", "doc-4"]);
        let requests = provider.bulk_requests.clone();
        let service = IndexStoreService::with_config(
            Box::new(provider),
            IndexStoreServiceConfig::with_max_batch_size(2),
        );

        let result = service
            .bulk_upsert("catalogue", create_test_documents(5))
            .await
            .unwrap();

        assert_eq!(*requests.lock().await, vec![2, 2, 1]);
        assert_eq!(result.total, 5);
        assert_eq!(result.succeeded, 3);
        assert_eq!(result.failed, 2);
        let failed: Vec<&str> = result.failures().map(|r| r.document_id.as_str()).collect();
        assert_eq!(failed, vec!["doc-1", "doc-4"]);
    }

    #[tokio::test]
    async fn test_bulk_upsert_rejects_empty_document_id() {
        let provider = MockProvider::new();
        let requests = provider.bulk_requests.clone();
        let service = IndexStoreService::new(Box::new(provider));

        let mut documents = create_test_documents(3);
        documents[1].id = String::new();

        let result = service.bulk_upsert("catalogue", documents).await;

        assert!(matches!(result, Err(IndexStoreError::ValidationError(_))));
        assert!(requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_validation() {
        let provider = MockProvider::new();
        let upserts = provider.upserts.clone();
        let service = IndexStoreService::new(Box::new(provider));

        assert!(service
            .upsert("catalogue", IndexDocument::new("", json!({})))
            .await
            .is_err());
        assert!(service
            .upsert("Catalogue", IndexDocument::new("1", json!({})))
            .await
            .is_err());
        assert!(upserts.lock().await.is_empty());

        service
            .upsert("catalogue", IndexDocument::new("1", json!({ "id": "1" })))
            .await
            .unwrap();
        assert_eq!(upserts.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_index_operations_validate_name() {
        let service = IndexStoreService::new(Box::new(MockProvider::new()));

        assert!(service.index_exists("").await.is_err());
        assert!(service.create_index("_bad").await.is_err());
        assert!(service.delete_index("bad name").await.is_err());
        assert!(service.index_exists("catalogue").await.unwrap());
    }

    #[tokio::test]
    async fn test_search_delegates() {
        let service = IndexStoreService::new(Box::new(MockProvider::new()));

        let hits = service
            .search("catalogue", &BooleanQuery::default())
            .await
            .unwrap();
        assert_eq!(hits, vec![json!({ "id": "1" })]);
    }
}
