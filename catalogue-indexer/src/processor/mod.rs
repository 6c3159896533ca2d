//! Processor module for the catalogue indexer.
//!
//! Normalizes a decoded catalogue tree into the documents written to the
//! search indices.

mod attribute_aggregator;
mod image_selection;
mod variant_flattener;

pub use attribute_aggregator::{aggregate, FacetAccumulator};
pub use image_selection::{select_images, select_renditions, RENDITION_WIDTHS};
pub use variant_flattener::flatten;
