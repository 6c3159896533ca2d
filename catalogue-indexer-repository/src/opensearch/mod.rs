//! OpenSearch implementation of the index store provider.
//!
//! This module provides a concrete implementation of `IndexStoreProvider`
//! using OpenSearch as the backend.

mod index_config;
mod provider;
mod query_dsl;

pub use index_config::{IndexConfig, ATTRIBUTES_INDEX, CATALOGUE_INDEX, DEFAULT_SEARCH_SIZE};
pub use provider::OpenSearchProvider;
pub use query_dsl::to_query_dsl;
