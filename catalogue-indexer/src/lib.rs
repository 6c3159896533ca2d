//! # Catalogue Indexer
//!
//! Re-indexes a hierarchical product catalogue, fetched from the catalogue
//! API over GraphQL, into flat OpenSearch indices, and serves search over
//! them.
//!
//! ## Architecture
//!
//! A reindex run follows the Fetch-Processor-Loader pattern:
//!
//! 1. **Catalogue**: Fetches the raw catalogue tree for a tenant
//! 2. **Processor**: Flattens variants into records or aggregates attributes
//! 3. **Loader**: Replaces the target index and bulk indexes the documents
//! 4. **Pipeline**: Coordinates one run and reports its outcome
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`catalogue`]: Catalogue API client and queries
//! - [`processor`]: Variant flattening and attribute aggregation
//! - [`loader`]: Index replacement and bulk loading
//! - [`pipeline`]: Reindex tasks and the run state machine
//! - [`server`]: HTTP index and search endpoints
//! - [`errors`]: Error types for the indexer

pub mod catalogue;
pub mod config;
pub mod errors;
pub mod loader;
pub mod pipeline;
pub mod processor;
pub mod server;

pub use config::{AppConfig, Dependencies};
pub use errors::{CatalogueError, ReindexError};
pub use pipeline::{ReindexPipeline, ReindexReport, ReindexTask};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP server error.
    #[error("Server error: {0}")]
    ServerError(String),

    /// Reindex error.
    #[error("Reindex error: {0}")]
    ReindexError(#[from] ReindexError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a server error.
    pub fn server(msg: impl Into<String>) -> Self {
        Self::ServerError(msg.into())
    }
}
