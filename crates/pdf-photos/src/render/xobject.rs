//! Image XObject creation
//!
//! Every page image is re-encoded as baseline JPEG and embedded with the
//! `DCTDecode` filter, whatever the source format was. Transparent pixels
//! are flattened onto white first since JPEG has no alpha channel.

use crate::decode::DecodedImage;
use crate::types::{PhotoPdfError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage};
use lopdf::{Dictionary, Object, Stream};

/// A page image ready to be embedded
#[derive(Debug)]
pub struct EncodedImage {
    pub index: usize,
    pub width: u32,
    pub height: u32,
    /// Baseline JPEG data
    pub data: Vec<u8>,
}

/// Re-encode a decoded image as JPEG at the given quality (1-100).
///
/// The decoded pixels and their lease are released once the JPEG is built.
pub fn encode_jpeg(decoded: DecodedImage, quality: u8) -> Result<EncodedImage> {
    let DecodedImage {
        index,
        width,
        height,
        pixels,
        lease,
    } = decoded;

    let rgb = flatten_to_rgb(pixels);

    let mut data = Vec::new();
    JpegEncoder::new_with_quality(&mut data, quality)
        .encode_image(&rgb)
        .map_err(|e| PhotoPdfError::Encode(format!("image {index}: {e}")))?;

    log::debug!(
        "Encoded image {} as JPEG ({} bytes, quality {})",
        index,
        data.len(),
        quality
    );

    drop(lease);

    Ok(EncodedImage {
        index,
        width,
        height,
        data,
    })
}

/// Convert to 8-bit RGB, blending any alpha channel over a white background.
fn flatten_to_rgb(pixels: DynamicImage) -> RgbImage {
    if !pixels.color().has_alpha() {
        return pixels.to_rgb8();
    }

    let rgba = pixels.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as f32 / 255.0;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Build the Image XObject stream for an encoded page image.
///
/// The JPEG data moves into the stream as-is; it must not be deflated again.
pub fn image_xobject(image: EncodedImage) -> Stream {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(image.width as i64));
    dict.set("Height", Object::Integer(image.height as i64));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));

    Stream::new(dict, image.data).with_compression(false)
}
