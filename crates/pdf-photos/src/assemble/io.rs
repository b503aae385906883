//! File I/O for photo documents

use crate::output::PhotoDocument;
use crate::types::*;
use std::path::Path;

/// Load a single image file as a snapshot entry labelled with its file name
pub async fn load_image(path: impl AsRef<Path>) -> Result<SourceImage> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SourceImage::new(label, bytes))
}

/// Load multiple image files, preserving their order
pub async fn load_images(paths: &[impl AsRef<Path>]) -> Result<Vec<SourceImage>> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        images.push(load_image(path).await?);
    }
    Ok(images)
}

/// Save an assembled document
pub async fn save_pdf(doc: &PhotoDocument, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    tokio::fs::write(path, doc.bytes()).await?;
    log::info!("Wrote {} page(s) to {}", doc.page_count(), path.display());
    Ok(())
}
