//! Error types for the catalogue indexer.

use std::fmt;

use catalogue_indexer_repository::IndexStoreError;
use thiserror::Error;

/// Errors raised while fetching the catalogue tree from the catalogue API.
#[derive(Error, Debug)]
pub enum CatalogueError {
    /// The request could not be sent or the response could not be read.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The API answered with a non-success status code.
    #[error("Catalogue API returned status {status}: {body}")]
    StatusError { status: u16, body: String },

    /// The GraphQL response carried an `errors` array.
    #[error("GraphQL error: {0}")]
    GraphQlError(String),

    /// The response did not have the expected `data.catalogue.children` shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl CatalogueError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a GraphQL error.
    pub fn graphql(msg: impl Into<String>) -> Self {
        Self::GraphQlError(msg.into())
    }

    /// Create a malformed response error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}

impl From<reqwest::Error> for CatalogueError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}

/// Pipeline stage in which a reindex run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReindexStage {
    /// Input checks before any I/O.
    Validation,
    /// Fetching the catalogue tree.
    Fetch,
    /// Decoding and normalizing the tree into documents.
    Normalize,
    /// Checking whether the target index exists.
    IndexExists,
    /// Deleting the previous index generation.
    IndexDelete,
    /// Creating the fresh index.
    IndexCreate,
    /// Bulk inserting the documents.
    BulkInsert,
}

impl fmt::Display for ReindexStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::Fetch => "fetch",
            Self::Normalize => "normalize",
            Self::IndexExists => "index-exists",
            Self::IndexDelete => "index-delete",
            Self::IndexCreate => "index-create",
            Self::BulkInsert => "bulk-insert",
        };
        f.write_str(name)
    }
}

/// A document the index store refused during a bulk insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedDocument {
    pub document_id: String,
    pub reason: String,
}

/// Errors that abort a reindex run.
#[derive(Error, Debug)]
pub enum ReindexError {
    /// No tenant identifier was given.
    #[error("You must provide a tenant identifier to index")]
    MissingTenant,

    /// The task name does not match any known task.
    #[error("Task does not exist with name: {0}")]
    UnknownTask(String),

    /// The catalogue tree could not be fetched.
    #[error("Fetch failed: {0}")]
    FetchError(#[from] CatalogueError),

    /// A node payload disagrees with its declared type, or a record could not be encoded.
    #[error("Shape error: {0}")]
    ShapeError(String),

    /// An index store operation failed.
    #[error("Index store {stage} failed: {source}")]
    StoreError {
        stage: ReindexStage,
        source: IndexStoreError,
    },

    /// The bulk request was accepted but some documents were rejected.
    #[error("Bulk index into '{index}' rejected {failed} documents ({succeeded} accepted)")]
    BulkPartialFailure {
        index: String,
        succeeded: usize,
        failed: usize,
        rejected: Vec<RejectedDocument>,
    },
}

impl ReindexError {
    /// Create a shape error.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::ShapeError(msg.into())
    }

    /// Create a store error for the given stage.
    pub fn store(stage: ReindexStage, source: IndexStoreError) -> Self {
        Self::StoreError { stage, source }
    }

    /// The stage the run was in when this error occurred.
    pub fn stage(&self) -> ReindexStage {
        match self {
            Self::MissingTenant | Self::UnknownTask(_) => ReindexStage::Validation,
            Self::FetchError(_) => ReindexStage::Fetch,
            Self::ShapeError(_) => ReindexStage::Normalize,
            Self::StoreError { stage, .. } => *stage,
            Self::BulkPartialFailure { .. } => ReindexStage::BulkInsert,
        }
    }
}
