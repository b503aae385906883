use crate::constants::mm_to_pt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoPdfError {
    #[error("Invalid image{}: dimensions {}x{}", index_suffix(.index), .width, .height)]
    InvalidImage {
        index: Option<usize>,
        width: f32,
        height: f32,
    },
    #[error("Failed to decode image {index}: {source}")]
    ImageDecode {
        index: usize,
        #[source]
        source: image::ImageError,
    },
    #[error("Encode error: {0}")]
    Encode(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl PhotoPdfError {
    /// Attach the position of the offending image to an `InvalidImage` error.
    pub(crate) fn at_index(self, position: usize) -> Self {
        match self {
            PhotoPdfError::InvalidImage { width, height, .. } => PhotoPdfError::InvalidImage {
                index: Some(position),
                width,
                height,
            },
            other => other,
        }
    }

    /// Position of the image that caused the failure, if the error is tied to one
    pub fn image_index(&self) -> Option<usize> {
        match self {
            PhotoPdfError::InvalidImage { index, .. } => *index,
            PhotoPdfError::ImageDecode { index, .. } => Some(*index),
            _ => None,
        }
    }
}

fn index_suffix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" {i}"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, PhotoPdfError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Page size in points with orientation applied
    pub fn page_size(self, orientation: Orientation) -> PageSize {
        let (w, h) = self.dimensions_with_orientation(orientation);
        PageSize::from_mm(w, h)
    }
}

/// Fixed target page size, in whatever unit the caller lays out in.
///
/// Documents are always laid out in PDF points; the layout functions
/// themselves are unit-agnostic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Page size in points from millimeter dimensions
    pub fn from_mm(width_mm: f32, height_mm: f32) -> Self {
        Self::new(mm_to_pt(width_mm), mm_to_pt(height_mm))
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    pub fn validate(&self) -> Result<()> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(PhotoPdfError::Config(format!(
                "Page dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for PageSize {
    /// A4 portrait
    fn default() -> Self {
        PaperSize::A4.page_size(Orientation::Portrait)
    }
}

/// One image of a generation snapshot: a label for diagnostics and the
/// encoded source bytes (JPEG, PNG, ...).
///
/// Bytes are shared, so cloning a snapshot never copies pixel data.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub label: String,
    pub bytes: Arc<[u8]>,
}

impl SourceImage {
    pub fn new(label: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            label: label.into(),
            bytes: bytes.into(),
        }
    }
}
