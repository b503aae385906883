//! Source image decoding
//!
//! Decoding is CPU-bound and runs on the blocking pool; callers await one
//! image at a time so page order never depends on completion order.
//!
//! The EXIF orientation tag is applied on decode, so width and height are
//! those of the upright image.

use crate::resources::{ResourceKind, ResourceLease, ResourceTracker};
use crate::types::*;
use image::metadata::Orientation as ExifOrientation;
use image::{DynamicImage, ImageDecoder, ImageReader, Limits};
use std::io::Cursor;
use std::sync::Arc;

/// A decoded source image with its intrinsic pixel dimensions
#[derive(Debug)]
pub struct DecodedImage {
    /// Position of the image in the generation snapshot
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub(crate) pixels: DynamicImage,
    pub(crate) lease: ResourceLease,
}

/// Decode image bytes and check their dimensions.
///
/// # Errors
/// `ImageDecode` if the bytes are not a decodable raster image,
/// `InvalidImage` if the decoded image has a zero dimension.
pub async fn decode_image(
    index: usize,
    bytes: Arc<[u8]>,
    tracker: &ResourceTracker,
) -> Result<DecodedImage> {
    let tracker = tracker.clone();
    tokio::task::spawn_blocking(move || decode_image_sync(index, &bytes, &tracker)).await?
}

pub(crate) fn decode_image_sync(
    index: usize,
    bytes: &[u8],
    tracker: &ResourceTracker,
) -> Result<DecodedImage> {
    let decode_err = |source| PhotoPdfError::ImageDecode { index, source };
    let mut decoder = open_reader(bytes)?.into_decoder().map_err(decode_err)?;
    let orientation = decoder.orientation().map_err(decode_err)?;
    let mut pixels = DynamicImage::from_decoder(decoder).map_err(decode_err)?;
    pixels.apply_orientation(orientation);

    let (width, height) = (pixels.width(), pixels.height());
    if width == 0 || height == 0 {
        return Err(PhotoPdfError::InvalidImage {
            index: Some(index),
            width: width as f32,
            height: height as f32,
        });
    }

    log::debug!("Decoded image {} ({}x{})", index, width, height);

    Ok(DecodedImage {
        index,
        width,
        height,
        pixels,
        lease: tracker.acquire(ResourceKind::DecodedImage),
    })
}

/// Read only the pixel dimensions of each image, in order.
///
/// Only image headers are parsed; used to plan a layout without producing a
/// document.
pub async fn probe_dimensions(images: &[SourceImage]) -> Result<Vec<(u32, u32)>> {
    let mut dimensions = Vec::with_capacity(images.len());
    for (index, source) in images.iter().enumerate() {
        let bytes = Arc::clone(&source.bytes);
        let dims = tokio::task::spawn_blocking(move || read_dimensions(index, &bytes)).await??;
        dimensions.push(dims);
    }
    Ok(dimensions)
}

fn read_dimensions(index: usize, bytes: &[u8]) -> Result<(u32, u32)> {
    let decode_err = |source| PhotoPdfError::ImageDecode { index, source };
    let mut decoder = open_reader(bytes)?.into_decoder().map_err(decode_err)?;
    let (width, height) = decoder.dimensions();
    let orientation = decoder.orientation().map_err(decode_err)?;

    if swaps_axes(orientation) {
        Ok((height, width))
    } else {
        Ok((width, height))
    }
}

/// Allocation limits for decoding: none, photos of any size are accepted.
pub(crate) fn decode_limits() -> Limits {
    Limits::no_limits()
}

fn open_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>> {
    let mut reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    reader.limits(decode_limits());
    Ok(reader)
}

/// Whether applying `orientation` exchanges width and height
fn swaps_axes(orientation: ExifOrientation) -> bool {
    matches!(
        orientation,
        ExifOrientation::Rotate90
            | ExifOrientation::Rotate270
            | ExifOrientation::Rotate90FlipH
            | ExifOrientation::Rotate270FlipH
    )
}
