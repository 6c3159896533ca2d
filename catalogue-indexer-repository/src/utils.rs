//! Utility functions for the catalogue indexer repository.

use crate::errors::IndexStoreError;

/// Characters OpenSearch rejects in index names.
const INVALID_INDEX_CHARS: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ',', '#', ':'];

/// Validate an index name against the store's naming rules.
///
/// Index names must be non-empty, lowercase, contain no whitespace or
/// reserved characters, and must not start with `-`, `_` or `+`.
///
/// # Example
///
/// ```
/// use catalogue_indexer_repository::validate_index_name;
///
/// assert!(validate_index_name("catalogue").is_ok());
/// assert!(validate_index_name("Catalogue").is_err());
/// ```
pub fn validate_index_name(index: &str) -> Result<(), IndexStoreError> {
    if index.is_empty() {
        return Err(IndexStoreError::validation("Index name is required"));
    }

    if index.starts_with(['-', '_', '+']) {
        return Err(IndexStoreError::validation(format!(
            "Index name '{}' must not start with '-', '_' or '+'",
            index
        )));
    }

    if index
        .chars()
        .any(|c| c.is_uppercase() || c.is_whitespace() || INVALID_INDEX_CHARS.contains(&c))
    {
        return Err(IndexStoreError::validation(format!(
            "Index name '{}' contains invalid characters",
            index
        )));
    }

    Ok(())
}

/// Validate that a document ID is present.
pub fn validate_document_id(document_id: &str) -> Result<(), IndexStoreError> {
    if document_id.is_empty() {
        return Err(IndexStoreError::validation("Document ID is required"));
    }
    Ok(())
}
