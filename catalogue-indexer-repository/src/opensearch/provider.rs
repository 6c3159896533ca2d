//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `IndexStoreProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use catalogue_indexer_shared::BooleanQuery;
use opensearch::{
    auth::Credentials,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    http::response::Response,
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    params::Refresh,
    BulkOperation, BulkParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::IndexStoreError;
use crate::interfaces::IndexStoreProvider;
use crate::opensearch::index_config::IndexConfig;
use crate::opensearch::query_dsl::to_query_dsl;
use crate::types::{BatchOperationResult, BatchOperationSummary, IndexDocument};

/// OpenSearch provider implementation.
///
/// Works against OpenSearch and Elasticsearch 7 compatible clusters.
///
/// # Example
///
/// ```ignore
/// use catalogue_indexer_repository::opensearch::{IndexConfig, OpenSearchProvider};
///
/// let provider = OpenSearchProvider::new("http://localhost:9200", None, IndexConfig::default()).await?;
/// if !provider.index_exists("catalogue").await? {
///     provider.create_index("catalogue").await?;
/// }
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `credentials` - Optional basic auth `(username, password)`
    /// * `index_config` - Settings applied to created indices and searches
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(IndexStoreError)` - If connection setup fails
    pub async fn new(
        url: &str,
        credentials: Option<(String, String)>,
        index_config: IndexConfig,
    ) -> Result<Self, IndexStoreError> {
        let parsed_url =
            Url::parse(url).map_err(|e| IndexStoreError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        let authenticated = credentials.is_some();
        if let Some((username, password)) = credentials {
            builder = builder.auth(Credentials::Basic(username, password));
        }
        let transport = builder
            .build()
            .map_err(|e| IndexStoreError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            authenticated = authenticated,
            shards = index_config.number_of_shards,
            replicas = index_config.number_of_replicas,
            "Created OpenSearch provider"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Read the body of a non-success response for error reporting.
    async fn error_body(response: Response) -> String {
        response.text().await.unwrap_or_default()
    }
}

/// Check that an index management response carries `"acknowledged": true`.
fn ensure_acknowledged(body: &Value, operation: &str, index: &str) -> Result<(), IndexStoreError> {
    let acknowledged = body
        .get("acknowledged")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !acknowledged {
        error!(index = %index, body = %body, "{} was not acknowledged", operation);
        return Err(IndexStoreError::not_acknowledged(operation, index));
    }
    Ok(())
}

/// Build the per-document bulk operations for a batch.
fn bulk_operations(documents: &[IndexDocument]) -> Vec<BulkOperation<Value>> {
    documents
        .iter()
        .map(|doc| BulkOperation::index(doc.body.clone()).id(doc.id.clone()).into())
        .collect()
}

/// Convert a `_bulk` response into per-document results.
///
/// Items are reported in request order; the item's own `_id` is preferred over
/// the position when present.
fn parse_bulk_response(
    body: &Value,
    documents: &[IndexDocument],
) -> Result<BatchOperationSummary, IndexStoreError> {
    let items = body
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| IndexStoreError::parse("Bulk response has no items array"))?;

    if items.len() != documents.len() {
        return Err(IndexStoreError::parse(format!(
            "Bulk response has {} items for {} documents",
            items.len(),
            documents.len()
        )));
    }

    let results = items
        .iter()
        .zip(documents)
        .map(|(item, doc)| {
            // Each item is keyed by its action: {"index": {...}}
            let outcome = item
                .as_object()
                .and_then(|actions| actions.values().next())
                .cloned()
                .unwrap_or(Value::Null);
            let document_id = outcome
                .get("_id")
                .and_then(Value::as_str)
                .unwrap_or(doc.id.as_str())
                .to_string();

            match outcome.get("error") {
                Some(error) if !error.is_null() => {
                    let status = outcome.get("status").and_then(Value::as_u64).unwrap_or(0);
                    let reason = error
                        .get("reason")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| error.to_string());
                    BatchOperationResult::failed(
                        document_id,
                        IndexStoreError::index(format!("status {}: {}", status, reason)),
                    )
                }
                _ => BatchOperationResult::succeeded(document_id),
            }
        })
        .collect();

    Ok(BatchOperationSummary::from_results(results))
}

/// Extract the `_source` of every hit in a search response.
fn search_hits(body: &Value) -> Result<Vec<Value>, IndexStoreError> {
    let hits = body
        .get("hits")
        .and_then(|hits| hits.get("hits"))
        .and_then(Value::as_array)
        .ok_or_else(|| IndexStoreError::parse("Search response has no hits array"))?;

    Ok(hits
        .iter()
        .filter_map(|hit| hit.get("_source").cloned())
        .collect())
}

#[async_trait]
impl IndexStoreProvider for OpenSearchProvider {
    async fn index_exists(&self, index: &str) -> Result<bool, IndexStoreError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| IndexStoreError::index_exists(e.to_string()))?;

        let status = response.status_code();
        match status.as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            _ => {
                let error_body = Self::error_body(response).await;
                error!(index = %index, status = %status, body = %error_body, "Index exists request failed");
                Err(IndexStoreError::index_exists(format!(
                    "Exists check failed with status {}: {}",
                    status, error_body
                )))
            }
        }
    }

    async fn create_index(&self, index: &str) -> Result<(), IndexStoreError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(self.index_config.index_settings())
            .send()
            .await
            .map_err(|e| IndexStoreError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(index = %index, status = %status, body = %error_body, "Create index request failed");
            return Err(IndexStoreError::index_creation(format!(
                "Create index failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| IndexStoreError::parse(e.to_string()))?;
        ensure_acknowledged(&body, "Creation", index)?;

        info!(index = %index, "Index created");
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<(), IndexStoreError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| IndexStoreError::index_deletion(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(index = %index, status = %status, body = %error_body, "Delete index request failed");
            return Err(IndexStoreError::index_deletion(format!(
                "Delete index failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| IndexStoreError::parse(e.to_string()))?;
        ensure_acknowledged(&body, "Deletion", index)?;

        info!(index = %index, "Index deleted");
        Ok(())
    }

    async fn upsert_document(
        &self,
        index: &str,
        document: &IndexDocument,
    ) -> Result<(), IndexStoreError> {
        let response = self
            .client
            .index(IndexParts::IndexId(index, &document.id))
            .body(document.body.clone())
            .refresh(Refresh::WaitFor)
            .send()
            .await
            .map_err(|e| IndexStoreError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(IndexStoreError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(index = %index, doc_id = %document.id, "Document indexed");
        Ok(())
    }

    async fn bulk_upsert_documents(
        &self,
        index: &str,
        documents: &[IndexDocument],
    ) -> Result<BatchOperationSummary, IndexStoreError> {
        if documents.is_empty() {
            return Ok(BatchOperationSummary::empty());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(bulk_operations(documents))
            .send()
            .await
            .map_err(|e| IndexStoreError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(IndexStoreError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| IndexStoreError::parse(e.to_string()))?;
        let summary = parse_bulk_response(&body, documents)?;

        debug!(
            index = %index,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk request completed"
        );
        Ok(summary)
    }

    async fn search(
        &self,
        index: &str,
        query: &BooleanQuery,
    ) -> Result<Vec<Value>, IndexStoreError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(json!({
                "query": to_query_dsl(query),
                "size": self.index_config.search_size
            }))
            .send()
            .await
            .map_err(|e| IndexStoreError::search(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(IndexStoreError::search(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| IndexStoreError::parse(e.to_string()))?;
        search_hits(&body)
    }
}
