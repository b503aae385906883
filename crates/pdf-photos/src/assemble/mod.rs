//! Photo document assembly
//!
//! This module orchestrates document generation:
//! 1. Decode each image of the snapshot, in order
//! 2. Calculate its placement on a fixed-size page
//! 3. Re-encode it and place it on its own page
//! 4. Serialize the complete document once every page is placed

mod io;

pub use io::{load_image, load_images, save_pdf};

use crate::decode::decode_image;
use crate::layout::compute_placement;
use crate::options::PhotoPdfOptions;
use crate::output::PhotoDocument;
use crate::render::{PageWriter, encode_jpeg};
use crate::resources::ResourceTracker;
use crate::types::*;

/// Assemble one page per image into a single PDF.
///
/// Returns `Ok(None)` when `images` is empty: there is nothing to do, which
/// is not an error. Any decode, encode or serialization failure aborts the
/// whole assembly; no partial document is ever returned.
pub async fn assemble_document(
    images: &[SourceImage],
    options: &PhotoPdfOptions,
) -> Result<Option<PhotoDocument>> {
    assemble_document_tracked(images, options, &ResourceTracker::new()).await
}

/// Same as [`assemble_document`], accounting decoded images to `tracker`.
pub async fn assemble_document_tracked(
    images: &[SourceImage],
    options: &PhotoPdfOptions,
    tracker: &ResourceTracker,
) -> Result<Option<PhotoDocument>> {
    if images.is_empty() {
        log::debug!("No images to assemble");
        return Ok(None);
    }
    options.validate()?;

    let page_size = options.page_size();
    let quality = options.jpeg_quality;
    let mut writer = PageWriter::new(page_size);
    let mut placements = Vec::with_capacity(images.len());

    for (index, source) in images.iter().enumerate() {
        let decoded = match decode_image(index, source.bytes.clone(), tracker).await {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!(
                    "Aborting assembly at image {} ({}): {}",
                    index,
                    source.label,
                    e
                );
                return Err(e);
            }
        };

        let placement = compute_placement(decoded.width as f32, decoded.height as f32, page_size)
            .map_err(|e| e.at_index(index))?;
        let encoded =
            tokio::task::spawn_blocking(move || encode_jpeg(decoded, quality)).await??;

        if index > 0 {
            writer.add_page();
        }
        writer.place_image(encoded, &placement)?;
        placements.push(placement);
    }

    debug_assert_eq!(writer.page_count(), images.len());
    log::debug!("Placed {} images, serializing", writer.placed_images());

    let title = options.title.clone();
    let bytes = tokio::task::spawn_blocking(move || writer.finish(&title)).await??;

    log::info!(
        "Assembled {} page(s) into {} bytes",
        placements.len(),
        bytes.len()
    );

    Ok(Some(PhotoDocument::new(
        bytes,
        placements,
        page_size,
        options.title.clone(),
    )))
}
