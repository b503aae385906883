//! Shared constants for photo document generation

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Output Defaults
// =============================================================================

/// Default download name for generated documents
pub const DEFAULT_FILE_NAME: &str = "photos.pdf";

/// Default document title written to the PDF /Info dictionary
pub const DEFAULT_TITLE: &str = "Photos";

/// Default JPEG quality used when re-encoding page images
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// MIME type of the preview stream
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// PDF header version of generated documents
pub const PDF_VERSION: &str = "1.7";

/// Producer string written to the PDF /Info dictionary
pub const PRODUCER: &str = concat!("pdf-photos ", env!("CARGO_PKG_VERSION"));

/// Resource name of the single image placed on each page
pub const PAGE_IMAGE_NAME: &str = "Im0";
