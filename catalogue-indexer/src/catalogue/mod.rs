//! Catalogue API access.
//!
//! Fetches the raw catalogue tree for a tenant over GraphQL.

mod client;
pub mod queries;

pub use client::{extract_children, CatalogueFetcher, GraphQlCatalogueClient};
