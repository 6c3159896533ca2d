//! Image rendition selection for indexed variants.

use catalogue_indexer_shared::{Image, ProductVariant};

/// Rendition widths kept on indexed images.
pub const RENDITION_WIDTHS: [u32; 2] = [200, 500];

/// Copy of `image` keeping only renditions with an allowed width, in order.
pub fn select_renditions(image: &Image) -> Image {
    Image {
        key: image.key.clone(),
        url: image.url.clone(),
        variants: image
            .variants
            .iter()
            .filter(|rendition| RENDITION_WIDTHS.contains(&rendition.width))
            .cloned()
            .collect(),
    }
}

/// Keep the first image only, with its renditions filtered.
///
/// Returns `None` when there is no image at all so the field is left out of
/// the stored document.
pub fn select_images(images: Option<&[Image]>) -> Option<Vec<Image>> {
    images
        .and_then(|images| images.first())
        .map(|first| vec![select_renditions(first)])
}

/// Copy of `variant` with its image list reduced by [`select_images`].
pub(crate) fn with_selected_images(variant: &ProductVariant) -> ProductVariant {
    ProductVariant {
        images: select_images(variant.images.as_deref()),
        ..variant.clone()
    }
}
