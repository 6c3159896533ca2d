//! OpenSearch index configuration.
//!
//! This module defines the index names and the settings used when an index is
//! (re)created. Mappings are left dynamic so documents are stored with the
//! catalogue API's field names.

use serde_json::{json, Value};

/// Index holding one flat record per product variant.
pub const CATALOGUE_INDEX: &str = "catalogue";

/// Index holding one facet per variant attribute name.
pub const ATTRIBUTES_INDEX: &str = "attributes";

/// Default number of hits returned by a search.
pub const DEFAULT_SEARCH_SIZE: usize = 10;

/// Configuration applied to every index the provider creates or searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Number of primary shards for newly created indices.
    pub number_of_shards: u32,
    /// Number of replicas for newly created indices.
    pub number_of_replicas: u32,
    /// Maximum number of hits returned by a search.
    pub search_size: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            number_of_shards: 1,
            number_of_replicas: 1,
            search_size: DEFAULT_SEARCH_SIZE,
        }
    }
}

impl IndexConfig {
    /// Create a new index configuration.
    ///
    /// # Arguments
    ///
    /// * `number_of_shards` - Primary shard count
    /// * `number_of_replicas` - Replica count
    pub fn new(number_of_shards: u32, number_of_replicas: u32) -> Self {
        Self {
            number_of_shards,
            number_of_replicas,
            ..Default::default()
        }
    }

    /// Set the maximum number of hits returned by a search.
    pub fn with_search_size(mut self, search_size: usize) -> Self {
        self.search_size = search_size;
        self
    }

    /// Get the request body used to create an index.
    pub fn index_settings(&self) -> Value {
        json!({
            "settings": {
                "number_of_shards": self.number_of_shards,
                "number_of_replicas": self.number_of_replicas
            }
        })
    }
}
