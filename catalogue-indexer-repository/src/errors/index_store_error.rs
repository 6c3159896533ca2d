//! Index store error types.
//!
//! This module defines the unified error type for all index store operations,
//! including both low-level backend errors and validation errors.

use thiserror::Error;

/// Unified errors from index store operations.
///
/// Used by the `IndexStoreProvider` trait and `IndexStoreService`. Per-document
/// rejections inside a bulk request are not errors at this level; they are
/// reported in the `BatchOperationSummary`.
#[derive(Debug, Clone, Error)]
pub enum IndexStoreError {
    /// Validation error (e.g., empty index name or document ID).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to establish connection to the index store backend.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to check whether an index exists.
    #[error("Index exists error: {0}")]
    IndexExistsError(String),

    /// Failed to create an index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to delete an index.
    #[error("Index deletion error: {0}")]
    IndexDeletionError(String),

    /// The store answered the request but did not acknowledge it.
    #[error("{operation} of index '{index}' was not acknowledged")]
    NotAcknowledged { operation: String, index: String },

    /// Failed to index a single document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// The bulk request itself failed.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// Failed to execute a search.
    #[error("Search error: {0}")]
    SearchError(String),

    /// Failed to parse response from the index store backend.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the index store backend.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl IndexStoreError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index exists error.
    pub fn index_exists(msg: impl Into<String>) -> Self {
        Self::IndexExistsError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create an index deletion error.
    pub fn index_deletion(msg: impl Into<String>) -> Self {
        Self::IndexDeletionError(msg.into())
    }

    /// Create a not acknowledged error.
    pub fn not_acknowledged(operation: impl Into<String>, index: impl Into<String>) -> Self {
        Self::NotAcknowledged {
            operation: operation.into(),
            index: index.into(),
        }
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a bulk index error.
    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create a search error.
    pub fn search(msg: impl Into<String>) -> Self {
        Self::SearchError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}
