//! Configuration types for the IndexStoreService.

/// Configuration for the IndexStoreService.
///
/// Controls how bulk writes are sent to the index store backend.
#[derive(Debug, Clone, Default)]
pub struct IndexStoreServiceConfig {
    /// Maximum number of documents sent in a single bulk request.
    ///
    /// `None` (the default) sends every document of a bulk write in one
    /// request. When set, larger writes are split into consecutive requests
    /// and their results merged into one summary.
    pub max_batch_size: Option<usize>,
}

impl IndexStoreServiceConfig {
    /// Create a config with no batch size limit.
    pub fn unlimited() -> Self {
        Self {
            max_batch_size: None,
        }
    }

    /// Create a config with a custom batch size limit.
    ///
    /// # Arguments
    ///
    /// * `max_batch_size` - Maximum number of documents per bulk request. Zero is
    ///   treated as no limit.
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: Some(max_batch_size).filter(|size| *size > 0),
        }
    }
}
