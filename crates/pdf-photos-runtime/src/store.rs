//! Ordered collection of the images a session will turn into pages

use pdf_photos::{ResourceKind, ResourceLease, ResourceTracker, SourceImage};
use std::sync::Arc;

/// Stable identity of an image within one store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

/// One image held by the session
#[derive(Debug)]
pub struct ImageEntry {
    id: ImageId,
    name: String,
    bytes: Arc<[u8]>,
    lease: ResourceLease,
}

impl ImageEntry {
    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Tracker id of the lease backing this entry
    pub fn handle_id(&self) -> u64 {
        self.lease.id()
    }

    fn to_source(&self) -> SourceImage {
        SourceImage {
            label: self.name.clone(),
            bytes: Arc::clone(&self.bytes),
        }
    }
}

/// Images in page order.
///
/// Ids are handed out monotonically and never reused, even after `clear`.
/// Removing an entry drops its lease.
#[derive(Debug)]
pub struct ImageStore {
    entries: Vec<ImageEntry>,
    next_id: u64,
    tracker: ResourceTracker,
}

impl ImageStore {
    pub fn new(tracker: ResourceTracker) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            tracker,
        }
    }

    /// Append an image after the current last one
    pub fn add(&mut self, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> ImageId {
        self.next_id += 1;
        let id = ImageId(self.next_id);
        let entry = ImageEntry {
            id,
            name: name.into(),
            bytes: bytes.into(),
            lease: self.tracker.acquire(ResourceKind::SourceImage),
        };
        log::debug!("Added image {:?} ({}, {} bytes)", id, entry.name, entry.bytes.len());
        self.entries.push(entry);
        id
    }

    /// Append every image of `sources`, preserving their order
    pub fn extend(&mut self, sources: Vec<SourceImage>) -> Vec<ImageId> {
        sources
            .into_iter()
            .map(|source| self.add(source.label, source.bytes))
            .collect()
    }

    pub fn remove(&mut self, id: ImageId) -> Option<ImageEntry> {
        let index = self.position(id)?;
        self.remove_at(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<ImageEntry> {
        if index >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        log::debug!("Removed image {:?} at position {}", entry.id, index);
        Some(entry)
    }

    /// Swap the image at `index` with the one before it.
    ///
    /// Returns false (and changes nothing) for the first image or an out of
    /// range index.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index - 1);
        true
    }

    /// Swap the image at `index` with the one after it.
    ///
    /// Returns false (and changes nothing) for the last image or an out of
    /// range index.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index + 1);
        true
    }

    /// Take the image at `from` out and reinsert it at `to`.
    ///
    /// Images between the two positions shift by one. Returns false if either
    /// position is out of range.
    pub fn move_to(&mut self, from: usize, to: usize) -> bool {
        let len = self.entries.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            let entry = self.entries.remove(from);
            self.entries.insert(to, entry);
        }
        true
    }

    /// Drop every image and its lease
    pub fn clear(&mut self) {
        log::debug!("Clearing {} image(s)", self.entries.len());
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }

    pub fn position(&self, id: ImageId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Current order as an owned snapshot; bytes are shared, not copied
    pub fn snapshot(&self) -> Vec<SourceImage> {
        self.entries.iter().map(ImageEntry::to_source).collect()
    }
}
