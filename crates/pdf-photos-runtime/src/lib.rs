use std::path::PathBuf;

mod logger;
mod session;
mod store;
mod worker;

pub use logger::{AppLogger, LogEntry};
pub use session::{GenerationState, PhotoSession, PreviewRequest};
pub use store::{ImageEntry, ImageId, ImageStore};
pub use worker::worker_task;

// Re-export types from the library crate
pub use pdf_photos::{PhotoPdfError, PhotoPdfOptions};

/// Commands sent from a front end to the worker
#[derive(Debug)]
pub enum PhotoCommand {
    /// Load image files and append them in the given order
    AddFiles {
        paths: Vec<PathBuf>,
    },
    AddImage {
        name: String,
        bytes: Vec<u8>,
    },
    Remove {
        id: ImageId,
    },
    MoveUp {
        index: usize,
    },
    MoveDown {
        index: usize,
    },
    /// Drag-style reorder: take the image at `from` and reinsert it at `to`
    MoveTo {
        from: usize,
        to: usize,
    },
    ClearAll,
    Preview,
    /// Assemble the current images and write them out. A directory path
    /// receives the configured file name.
    Download {
        output_path: PathBuf,
    },
    ClosePreview,
    /// Replace the page and output options used by later runs
    SetOptions {
        options: PhotoPdfOptions,
    },
}

/// Updates sent from the worker to a front end
#[derive(Debug, Clone, PartialEq)]
pub enum PhotoUpdate {
    ImagesChanged {
        images: Vec<ImageSummary>,
    },
    PreviewStarted,
    /// A preview is already being generated; the request was ignored
    PreviewBusy,
    PreviewReady {
        page_count: usize,
        byte_len: usize,
    },
    PreviewClosed,
    OptionsChanged {
        options: PhotoPdfOptions,
    },
    DownloadComplete {
        path: PathBuf,
        page_count: usize,
    },
    /// The request needs at least one image
    NothingToDo,
    Error {
        message: String,
    },
}

/// What a front end needs to list an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSummary {
    pub id: ImageId,
    pub name: String,
    pub byte_len: usize,
}

impl From<&ImageEntry> for ImageSummary {
    fn from(entry: &ImageEntry) -> Self {
        Self {
            id: entry.id(),
            name: entry.name().to_string(),
            byte_len: entry.bytes().len(),
        }
    }
}
