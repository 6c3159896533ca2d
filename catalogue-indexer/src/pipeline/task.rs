//! Reindex task definitions.

use std::fmt;
use std::str::FromStr;

use catalogue_indexer_repository::opensearch::{ATTRIBUTES_INDEX, CATALOGUE_INDEX};
use catalogue_indexer_repository::{validate_document_id, IndexDocument, IndexStoreError};
use catalogue_indexer_shared::CatalogueNode;
use serde::Serialize;

use crate::catalogue::queries::{ATTRIBUTES_QUERY, CATALOGUE_QUERY};
use crate::errors::ReindexError;
use crate::processor::{aggregate, flatten};

/// A whole-catalogue reindex task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReindexTask {
    /// One document per product variant in the `catalogue` index.
    CatalogueBulkIndex,
    /// One document per attribute name in the `attributes` index.
    AttributesBulkIndex,
}

impl ReindexTask {
    pub const ALL: [ReindexTask; 2] = [Self::CatalogueBulkIndex, Self::AttributesBulkIndex];

    /// Name used to select the task on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CatalogueBulkIndex => "catalogue-bulk-index",
            Self::AttributesBulkIndex => "attributes-bulk-index",
        }
    }

    /// Index the task replaces.
    pub fn index_name(&self) -> &'static str {
        match self {
            Self::CatalogueBulkIndex => CATALOGUE_INDEX,
            Self::AttributesBulkIndex => ATTRIBUTES_INDEX,
        }
    }

    /// GraphQL query fetching the tree the task needs.
    pub fn query(&self) -> &'static str {
        match self {
            Self::CatalogueBulkIndex => CATALOGUE_QUERY,
            Self::AttributesBulkIndex => ATTRIBUTES_QUERY,
        }
    }

    /// Turn a decoded forest into the documents written to [`Self::index_name`].
    ///
    /// Every document must carry a non-empty ID; a variant without an `id` or
    /// an attribute without a name fails here, before the index is touched.
    pub fn normalize(&self, roots: &[CatalogueNode]) -> Result<Vec<IndexDocument>, ReindexError> {
        let documents: Result<Vec<IndexDocument>, _> = match self {
            Self::CatalogueBulkIndex => flatten(roots)
                .iter()
                .map(|record| to_document(record.document_id(), record))
                .collect(),
            Self::AttributesBulkIndex => aggregate(roots)
                .iter()
                .map(|facet| to_document(facet.document_id(), facet))
                .collect(),
        };
        documents.map_err(|e| ReindexError::shape(format!("{} record rejected: {}", self, e)))
    }
}

fn to_document<T: Serialize>(id: &str, record: &T) -> Result<IndexDocument, IndexStoreError> {
    validate_document_id(id)?;
    IndexDocument::from_record(id, record)
}

impl fmt::Display for ReindexTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReindexTask {
    type Err = ReindexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|task| task.name() == s)
            .ok_or_else(|| ReindexError::UnknownTask(s.to_string()))
    }
}
