//! Scoped ownership of image and preview resources
//!
//! Every loaded image, decoded page image and preview stream holds a
//! [`ResourceLease`]. Dropping the lease releases the resource, so removal,
//! clear-all, preview replacement and aborted assemblies all release what
//! they held without explicit cleanup calls. The [`ResourceTracker`] counts
//! live leases so leaks are observable.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// What a lease stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Source bytes of an image held by the session
    SourceImage,
    /// Decoded pixels, held until their page image is encoded
    DecodedImage,
    /// A generated document exposed for inline viewing
    PreviewStream,
}

#[derive(Debug, Default)]
struct TrackerState {
    next_id: u64,
    live: HashMap<u64, ResourceKind>,
}

/// Shared registry of live resources
#[derive(Debug, Clone, Default)]
pub struct ResourceTracker {
    state: Arc<Mutex<TrackerState>>,
}

impl ResourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new live resource. It stays live until the lease is dropped.
    pub fn acquire(&self, kind: ResourceKind) -> ResourceLease {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.live.insert(id, kind);
        log::trace!("Acquired {:?} resource #{}", kind, id);

        ResourceLease {
            id,
            kind,
            tracker: self.clone(),
        }
    }

    /// Number of live resources of any kind
    pub fn live(&self) -> usize {
        self.lock().live.len()
    }

    /// Number of live resources of one kind
    pub fn live_of(&self, kind: ResourceKind) -> usize {
        self.lock().live.values().filter(|&&k| k == kind).count()
    }

    /// Whether the resource with this id is still live
    pub fn is_live(&self, id: u64) -> bool {
        self.lock().live.contains_key(&id)
    }

    fn release(&self, id: u64) {
        if let Some(kind) = self.lock().live.remove(&id) {
            log::trace!("Released {:?} resource #{}", kind, id);
        }
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ownership of one tracked resource; releases it on drop
pub struct ResourceLease {
    id: u64,
    kind: ResourceKind,
    tracker: ResourceTracker,
}

impl ResourceLease {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl fmt::Debug for ResourceLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceLease")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Drop for ResourceLease {
    fn drop(&mut self) {
        self.tracker.release(self.id);
    }
}
