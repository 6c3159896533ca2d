//! Flat search record types.
//!
//! A [`FlatSearchRecord`] is the document stored in the catalogue index: one
//! per product variant, carrying both the variant and its owning product.

use serde::{Deserialize, Serialize};

use crate::types::catalogue_node::{NodeType, ProductNode, ProductVariant, Topic};

/// The product half of a flat search record.
///
/// Mirrors the product's catalogue fields; children are not embedded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDocument {
    pub id: String,
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub topics: Vec<Topic>,
    pub variants: Vec<ProductVariant>,
}

impl ProductDocument {
    /// Build the product document from a product node, replacing its variants.
    pub fn from_node(product: &ProductNode, variants: Vec<ProductVariant>) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            path: product.path.clone(),
            node_type: NodeType::Product,
            topics: product.topics.clone(),
            variants,
        }
    }
}

/// Document representation of a single product variant in the catalogue index.
///
/// The document ID is the variant ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlatSearchRecord {
    pub variant: ProductVariant,
    pub product: ProductDocument,
}

impl FlatSearchRecord {
    pub fn new(product: ProductDocument, variant: ProductVariant) -> Self {
        Self { variant, product }
    }

    /// Generate the document ID used in the search index.
    pub fn document_id(&self) -> &str {
        &self.variant.id
    }
}
