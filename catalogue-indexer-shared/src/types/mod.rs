//! This module defines the core data structures used across the catalogue indexer.

pub mod attribute_facet;
pub mod catalogue_node;
pub mod search_query;
pub mod search_record;
