//! Loader module for the catalogue indexer.
//!
//! Replaces a search index and bulk loads normalized documents into it.

use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::{RejectedDocument, ReindexError, ReindexStage};
use catalogue_indexer_repository::{IndexDocument, IndexStoreService};

/// Loader that writes documents into the index store.
///
/// The loader is responsible for:
/// - Dropping and recreating the target index
/// - Bulk indexing documents and turning rejected items into an error
pub struct CatalogueLoader {
    service: Arc<IndexStoreService>,
}

impl CatalogueLoader {
    /// Create a new loader over the given index store service.
    pub fn new(service: Arc<IndexStoreService>) -> Self {
        Self { service }
    }

    /// Delete `index` if it exists, then create it empty.
    ///
    /// Each step fails on its own; the index is left as the last successful
    /// step made it.
    #[instrument(skip(self))]
    pub async fn replace_index(&self, index: &str) -> Result<(), ReindexError> {
        let exists = self
            .service
            .index_exists(index)
            .await
            .map_err(|e| ReindexError::store(ReindexStage::IndexExists, e))?;

        if exists {
            debug!(index = %index, "Deleting existing index");
            self.service
                .delete_index(index)
                .await
                .map_err(|e| ReindexError::store(ReindexStage::IndexDelete, e))?;
        }

        self.service
            .create_index(index)
            .await
            .map_err(|e| ReindexError::store(ReindexStage::IndexCreate, e))?;

        info!(index = %index, replaced = exists, "Index created");
        Ok(())
    }

    /// Bulk index `documents` into `index` and return how many were stored.
    ///
    /// Any rejected document fails the load with
    /// [`ReindexError::BulkPartialFailure`]; accepted documents stay indexed.
    #[instrument(skip(self, documents), fields(document_count = documents.len()))]
    pub async fn load(
        &self,
        index: &str,
        documents: Vec<IndexDocument>,
    ) -> Result<usize, ReindexError> {
        let count = documents.len();

        let summary = match self.service.bulk_upsert(index, documents).await {
            Ok(summary) => summary,
            Err(e) => {
                error!(error = %e, count = count, "Failed to bulk index documents");
                return Err(ReindexError::store(ReindexStage::BulkInsert, e));
            }
        };

        if summary.has_failures() {
            warn!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Bulk index completed with some failures"
            );

            let rejected: Vec<RejectedDocument> = summary
                .failures()
                .map(|result| {
                    let reason = result
                        .error
                        .as_ref()
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| "unknown error".to_string());
                    error!(
                        document_id = %result.document_id,
                        error = %reason,
                        "Failed to index document"
                    );
                    RejectedDocument {
                        document_id: result.document_id.clone(),
                        reason,
                    }
                })
                .collect();

            return Err(ReindexError::BulkPartialFailure {
                index: index.to_string(),
                succeeded: summary.succeeded,
                failed: summary.failed,
                rejected,
            });
        }

        debug!(count = summary.succeeded, "Successfully indexed all documents");
        Ok(summary.succeeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalogue_indexer_repository::{
        BatchOperationResult, BatchOperationSummary, IndexStoreError, IndexStoreProvider,
    };
    use catalogue_indexer_shared::BooleanQuery;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Mock provider recording the calls made to it.
    #[derive(Default)]
    struct MockProvider {
        exists: bool,
        fail_delete: bool,
        reject_id: Option<String>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl MockProvider {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }
    }

    #[async_trait]
    impl IndexStoreProvider for MockProvider {
        async fn index_exists(&self, index: &str) -> Result<bool, IndexStoreError> {
            self.record(format!("exists:{}", index));
            Ok(self.exists)
        }

        async fn create_index(&self, index: &str) -> Result<(), IndexStoreError> {
            self.record(format!("create:{}", index));
            Ok(())
        }

        async fn delete_index(&self, index: &str) -> Result<(), IndexStoreError> {
            self.record(format!("delete:{}", index));
            if self.fail_delete {
                return Err(IndexStoreError::not_acknowledged("delete", index));
            }
            Ok(())
        }

        async fn upsert_document(
            &self,
            _index: &str,
            _document: &IndexDocument,
        ) -> Result<(), IndexStoreError> {
            Ok(())
        }

        async fn bulk_upsert_documents(
            &self,
            index: &str,
            documents: &[IndexDocument],
        ) -> Result<BatchOperationSummary, IndexStoreError> {
            self.record(format!("bulk:{}:{}", index, documents.len()));
            let results = documents
                .iter()
                .map(|doc| match &self.reject_id {
                    Some(id) if *id == doc.id => BatchOperationResult::failed(
                        &doc.id,
                        IndexStoreError::index("mapper_parsing_exception"),
                    ),
                    _ => BatchOperationResult::succeeded(&doc.id),
                })
                .collect();
            Ok(BatchOperationSummary::from_results(results))
        }

        async fn search(
            &self,
            _index: &str,
            _query: &BooleanQuery,
        ) -> Result<Vec<Value>, IndexStoreError> {
            Ok(vec![])
        }
    }

    fn loader(provider: MockProvider) -> (CatalogueLoader, Arc<Mutex<Vec<String>>>) {
        let calls = provider.calls.clone();
        let service = IndexStoreService::new(Box::new(provider));
        (CatalogueLoader::new(Arc::new(service)), calls)
    }

    fn documents(count: usize) -> Vec<IndexDocument> {
        (1..=count)
            .map(|i| IndexDocument::new(format!("v{}", i), json!({ "n": i })))
            .collect()
    }

    #[tokio::test]
    async fn test_replace_missing_index_only_creates() {
        let (loader, calls) = loader(MockProvider::default());
        loader.replace_index("catalogue").await.unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec!["exists:catalogue", "create:catalogue"]
        );
    }

    #[tokio::test]
    async fn test_replace_existing_index_deletes_first() {
        let (loader, calls) = loader(MockProvider {
            exists: true,
            ..Default::default()
        });
        loader.replace_index("attributes").await.unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec!["exists:attributes", "delete:attributes", "create:attributes"]
        );
    }

    #[tokio::test]
    async fn test_delete_failure_stops_before_create() {
        let (loader, calls) = loader(MockProvider {
            exists: true,
            fail_delete: true,
            ..Default::default()
        });
        let err = loader.replace_index("catalogue").await.unwrap_err();

        assert_eq!(err.stage(), ReindexStage::IndexDelete);
        assert!(!calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.starts_with("create")));
    }

    #[tokio::test]
    async fn test_load_all_accepted() {
        let (loader, calls) = loader(MockProvider::default());
        let stored = loader.load("catalogue", documents(3)).await.unwrap();

        assert_eq!(stored, 3);
        assert_eq!(*calls.lock().unwrap(), vec!["bulk:catalogue:3"]);
    }

    #[tokio::test]
    async fn test_load_rejected_document_is_partial_failure() {
        let (loader, _calls) = loader(MockProvider {
            reject_id: Some("v3".to_string()),
            ..Default::default()
        });
        let err = loader.load("catalogue", documents(5)).await.unwrap_err();

        match err {
            ReindexError::BulkPartialFailure {
                index,
                succeeded,
                failed,
                rejected,
            } => {
                assert_eq!(index, "catalogue");
                assert_eq!(succeeded, 4);
                assert_eq!(failed, 1);
                assert_eq!(rejected.len(), 1);
                assert_eq!(rejected[0].document_id, "v3");
                assert!(rejected[0].reason.contains("mapper_parsing_exception"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_empty_batch() {
        let (loader, calls) = loader(MockProvider::default());
        let stored = loader.load("catalogue", vec![]).await.unwrap();

        assert_eq!(stored, 0);
        assert!(calls.lock().unwrap().is_empty());
    }
}
