//! Session state: the image list, the options and the preview lifecycle
//!
//! Preview generation moves through `Idle -> Generating -> {Ready, Failed}`.
//! The session never runs the assembly itself; it hands out a snapshot when
//! a run may start and takes the run's result back afterwards.

use crate::store::ImageStore;
use pdf_photos::{
    PhotoDocument, PhotoPdfOptions, PreviewStream, ResourceTracker, Result, SourceImage,
};

/// Where preview generation currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Generating,
    Ready,
    Failed,
}

/// Answer to a preview request
#[derive(Debug)]
pub enum PreviewRequest {
    /// A run may start on this snapshot
    Started(Vec<SourceImage>),
    /// A run is already in flight; the request is refused
    AlreadyGenerating,
    /// There are no images
    NothingToDo,
}

#[derive(Debug)]
pub struct PhotoSession {
    store: ImageStore,
    options: PhotoPdfOptions,
    tracker: ResourceTracker,
    state: GenerationState,
    preview: Option<PreviewStream>,
    last_error: Option<String>,
}

impl PhotoSession {
    pub fn new(options: PhotoPdfOptions) -> Self {
        Self::with_tracker(options, ResourceTracker::new())
    }

    pub fn with_tracker(options: PhotoPdfOptions, tracker: ResourceTracker) -> Self {
        Self {
            store: ImageStore::new(tracker.clone()),
            options,
            tracker,
            state: GenerationState::Idle,
            preview: None,
            last_error: None,
        }
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ImageStore {
        &mut self.store
    }

    pub fn options(&self) -> &PhotoPdfOptions {
        &self.options
    }

    /// Options for runs requested from now on; a run in flight keeps its own
    pub fn set_options(&mut self, options: PhotoPdfOptions) {
        self.options = options;
    }

    pub fn tracker(&self) -> &ResourceTracker {
        &self.tracker
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn is_generating(&self) -> bool {
        self.state == GenerationState::Generating
    }

    /// The preview currently open, if any
    pub fn preview(&self) -> Option<&PreviewStream> {
        self.preview.as_ref()
    }

    /// Message of the most recent failed preview run
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Snapshot of the current image order
    pub fn snapshot(&self) -> Vec<SourceImage> {
        self.store.snapshot()
    }

    /// Ask to start a preview run.
    ///
    /// On `Started` the session is `Generating` until [`finish_preview`]
    /// is called with the run's result.
    ///
    /// [`finish_preview`]: PhotoSession::finish_preview
    pub fn request_preview(&mut self) -> PreviewRequest {
        if self.is_generating() {
            log::debug!("Preview requested while generating; refused");
            return PreviewRequest::AlreadyGenerating;
        }
        if self.store.is_empty() {
            return PreviewRequest::NothingToDo;
        }

        self.state = GenerationState::Generating;
        PreviewRequest::Started(self.store.snapshot())
    }

    /// Take back the result of a preview run.
    ///
    /// A document replaces (and releases) the open preview. An error moves to
    /// `Failed` and leaves the open preview and the image list as they were.
    /// `Ok(None)` means the run had nothing to assemble; the session returns
    /// to whatever state its open preview implies.
    pub fn finish_preview(
        &mut self,
        result: Result<Option<PhotoDocument>>,
    ) -> Result<Option<&PreviewStream>> {
        match result {
            Ok(Some(doc)) => {
                let stream = doc.preview(&self.tracker);
                log::info!(
                    "Preview ready: {} page(s), {} bytes",
                    stream.page_count(),
                    stream.bytes().len()
                );
                self.preview = Some(stream);
                self.state = GenerationState::Ready;
                self.last_error = None;
                Ok(self.preview.as_ref())
            }
            Ok(None) => {
                self.state = self.resting_state();
                Ok(None)
            }
            Err(e) => {
                log::warn!("Preview generation failed: {}", e);
                self.state = GenerationState::Failed;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Close the open preview. Returns false if none was open.
    pub fn close_preview(&mut self) -> bool {
        let closed = self.preview.take().is_some();
        if !self.is_generating() {
            self.state = GenerationState::Idle;
        }
        closed
    }

    fn resting_state(&self) -> GenerationState {
        if self.preview.is_some() {
            GenerationState::Ready
        } else {
            GenerationState::Idle
        }
    }
}
