//! Output channels for an assembled document
//!
//! A [`PhotoDocument`] is produced once per generation request. Both the
//! inline preview and the named download share its bytes; neither re-runs
//! the layout.

use crate::constants::PDF_MIME_TYPE;
use crate::layout::PagePlacement;
use crate::resources::{ResourceKind, ResourceLease, ResourceTracker};
use crate::types::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A complete, serialized photo document
#[derive(Debug, Clone)]
pub struct PhotoDocument {
    bytes: Arc<[u8]>,
    placements: Vec<PagePlacement>,
    page_size: PageSize,
    title: String,
}

impl PhotoDocument {
    pub(crate) fn new(
        bytes: Vec<u8>,
        placements: Vec<PagePlacement>,
        page_size: PageSize,
        title: String,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            placements,
            page_size,
            title,
        }
    }

    /// Serialized PDF bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn page_count(&self) -> usize {
        self.placements.len()
    }

    /// Placement of the image on each page, in page order
    pub fn placements(&self) -> &[PagePlacement] {
        &self.placements
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Expose the document for inline viewing.
    ///
    /// The returned stream holds a tracked lease; drop it to release the
    /// preview.
    pub fn preview(&self, tracker: &ResourceTracker) -> PreviewStream {
        PreviewStream {
            bytes: Arc::clone(&self.bytes),
            page_count: self.page_count(),
            lease: tracker.acquire(ResourceKind::PreviewStream),
        }
    }

    /// Expose the document as a named file for download.
    pub fn download(&self, file_name: impl Into<String>) -> DownloadFile {
        DownloadFile {
            file_name: file_name.into(),
            bytes: Arc::clone(&self.bytes),
        }
    }
}

/// An openable view of a generated document
#[derive(Debug)]
pub struct PreviewStream {
    bytes: Arc<[u8]>,
    page_count: usize,
    lease: ResourceLease,
}

impl PreviewStream {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        PDF_MIME_TYPE
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Tracker id of this preview; stays valid until the stream is dropped
    pub fn handle_id(&self) -> u64 {
        self.lease.id()
    }
}

/// A generated document paired with its download name
#[derive(Debug, Clone)]
pub struct DownloadFile {
    pub file_name: String,
    pub bytes: Arc<[u8]>,
}

impl DownloadFile {
    /// Write the file into `dir` under its download name.
    pub async fn save_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        tokio::fs::write(&path, &self.bytes[..]).await?;
        log::info!("Saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}
