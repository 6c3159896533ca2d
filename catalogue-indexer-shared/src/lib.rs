//! # Catalogue Indexer Shared
//!
//! This crate defines the data structures shared across the catalogue indexer:
//! the decoded catalogue tree, the flat records and attribute facets written to
//! the search index, and the boolean query model used to search it.

pub mod types;

pub use types::attribute_facet::AttributeFacet;
pub use types::catalogue_node::{
    CatalogueItem, CatalogueNode, Image, ImageVariant, ItemNode, NodeType, ProductNode,
    ProductVariant, Topic, VariantAttribute,
};
pub use types::search_query::{BooleanQuery, QueryClause, QueryParams};
pub use types::search_record::{FlatSearchRecord, ProductDocument};
