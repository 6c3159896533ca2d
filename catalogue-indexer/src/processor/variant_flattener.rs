//! Flattening of the catalogue tree into one search record per variant.

use catalogue_indexer_shared::{CatalogueNode, FlatSearchRecord, ProductDocument, ProductVariant};
use tracing::{debug, instrument};

use super::image_selection::with_selected_images;

/// Flatten a catalogue forest into search records.
///
/// Nodes are visited depth-first in pre-order. Every product emits one record
/// per variant before its children are visited; other nodes only contribute
/// their children. Records are not deduplicated across branches.
#[instrument(skip(roots), fields(root_count = roots.len()))]
pub fn flatten(roots: &[CatalogueNode]) -> Vec<FlatSearchRecord> {
    let mut records = Vec::new();
    for root in roots {
        flatten_node(root, &mut records);
    }
    debug!(record_count = records.len(), "Flattened catalogue");
    records
}

fn flatten_node(node: &CatalogueNode, records: &mut Vec<FlatSearchRecord>) {
    if let Some(product) = node.as_product() {
        let variants: Vec<ProductVariant> =
            product.variants.iter().map(with_selected_images).collect();
        let document = ProductDocument::from_node(product, variants.clone());

        for variant in variants {
            records.push(FlatSearchRecord::new(document.clone(), variant));
        }
    }

    for child in node.children() {
        flatten_node(child, records);
    }
}
