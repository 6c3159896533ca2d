//! Request and response types for index store operations.

use serde::Serialize;
use serde_json::Value;

use crate::errors::IndexStoreError;

/// A JSON document addressed by its ID within an index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDocument {
    /// The document ID.
    pub id: String,
    /// The document source.
    pub body: Value,
}

impl IndexDocument {
    pub fn new(id: impl Into<String>, body: Value) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }

    /// Serialize any record into a document with the given ID.
    pub fn from_record<T: Serialize>(
        id: impl Into<String>,
        record: &T,
    ) -> Result<Self, IndexStoreError> {
        let body = serde_json::to_value(record)
            .map_err(|e| IndexStoreError::serialization(e.to_string()))?;
        Ok(Self::new(id, body))
    }
}

/// Result of a batch operation for a single document.
///
/// Indicates whether the operation succeeded and includes error details if it
/// failed.
#[derive(Debug, Clone)]
pub struct BatchOperationResult {
    /// The document ID.
    pub document_id: String,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error if the operation failed.
    pub error: Option<IndexStoreError>,
}

impl BatchOperationResult {
    pub fn succeeded(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            success: true,
            error: None,
        }
    }

    pub fn failed(document_id: impl Into<String>, error: IndexStoreError) -> Self {
        Self {
            document_id: document_id.into(),
            success: false,
            error: Some(error),
        }
    }
}

/// Summary of a batch operation containing aggregate statistics and individual results.
///
/// The store does not roll back accepted documents, so callers must treat any
/// failure as a partially applied batch.
#[derive(Debug, Clone, Default)]
pub struct BatchOperationSummary {
    /// Total number of documents in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each document.
    pub results: Vec<BatchOperationResult>,
}

impl BatchOperationSummary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a summary from individual results.
    pub fn from_results(results: Vec<BatchOperationResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// Fold the results of another batch into this one.
    pub fn merge(&mut self, other: BatchOperationSummary) {
        self.total += other.total;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.results.extend(other.results);
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Iterate over the failed results.
    pub fn failures(&self) -> impl Iterator<Item = &BatchOperationResult> {
        self.results.iter().filter(|r| !r.success)
    }
}
