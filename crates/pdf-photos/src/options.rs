use crate::constants::{DEFAULT_FILE_NAME, DEFAULT_JPEG_QUALITY, DEFAULT_TITLE};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Photo document configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhotoPdfOptions {
    // Page geometry
    pub paper_size: PaperSize,
    pub orientation: Orientation,

    // Page image encoding (1-100)
    pub jpeg_quality: u8,

    // Output
    pub title: String,
    pub file_name: String,
}

impl Default for PhotoPdfOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            title: DEFAULT_TITLE.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl PhotoPdfOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| PhotoPdfError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PhotoPdfError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Target page size in points
    pub fn page_size(&self) -> PageSize {
        self.paper_size.page_size(self.orientation)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(PhotoPdfError::Config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }

        if let PaperSize::Custom {
            width_mm,
            height_mm,
        } = self.paper_size
        {
            if !(width_mm > 0.0 && height_mm > 0.0) {
                return Err(PhotoPdfError::Config(format!(
                    "Custom paper size must be positive, got {}x{} mm",
                    width_mm, height_mm
                )));
            }
        }

        if self.file_name.trim().is_empty() {
            return Err(PhotoPdfError::Config(
                "Output file name must not be empty".to_string(),
            ));
        }

        self.page_size().validate()
    }
}
