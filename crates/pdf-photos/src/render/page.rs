//! Page writing for photo documents
//!
//! The writer starts out with one open page. Every later page is added with
//! an explicit page break, so a document with N images has exactly N pages
//! in the order the images were placed. Nothing is serialized until
//! [`PageWriter::finish`].

use crate::constants::{PAGE_IMAGE_NAME, PDF_VERSION, PRODUCER};
use crate::layout::{PagePlacement, Rect};
use crate::types::{PageSize, PhotoPdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::xobject::{EncodedImage, image_xobject};

/// One page under construction
#[derive(Debug, Default)]
struct PendingPage {
    image: Option<ObjectId>,
    content: String,
}

/// Incrementally builds a multi-page photo document
pub struct PageWriter {
    doc: Document,
    pages_id: ObjectId,
    page_size: PageSize,
    pages: Vec<PendingPage>,
}

impl PageWriter {
    /// Create a writer with its first page already open.
    pub fn new(page_size: PageSize) -> Self {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();

        Self {
            doc,
            pages_id,
            page_size,
            pages: vec![PendingPage::default()],
        }
    }

    /// Insert a page break: subsequent placement goes on a new page.
    pub fn add_page(&mut self) {
        self.pages.push(PendingPage::default());
    }

    /// Number of pages opened so far
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of images placed so far
    pub fn placed_images(&self) -> usize {
        self.pages.iter().filter(|page| page.image.is_some()).count()
    }

    /// Place an image on the current page.
    ///
    /// Each page holds exactly one image; placing a second image on the same
    /// page is an error.
    pub fn place_image(&mut self, image: EncodedImage, placement: &PagePlacement) -> Result<()> {
        let page_number = self.pages.len();
        let page = self
            .pages
            .last_mut()
            .ok_or_else(|| PhotoPdfError::Config("No open page".to_string()))?;
        if page.image.is_some() {
            return Err(PhotoPdfError::Config(format!(
                "Page {} already holds an image",
                page_number
            )));
        }

        let index = image.index;
        let xobject_id = self.doc.add_object(image_xobject(image));
        page.image = Some(xobject_id);
        page.content = placement_command(PAGE_IMAGE_NAME, &placement.content_rect);

        log::debug!(
            "Placed image {} on page {} at ({:.2}, {:.2}) size {:.2}x{:.2}",
            index,
            page_number,
            placement.content_rect.x,
            placement.content_rect.y,
            placement.content_rect.width,
            placement.content_rect.height
        );

        Ok(())
    }

    /// Write the page tree and serialize the complete document.
    pub fn finish(mut self, title: &str) -> Result<Vec<u8>> {
        let pages_id = self.pages_id;
        let media_box = Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(self.page_size.width),
            Object::Real(self.page_size.height),
        ]);

        let pending = std::mem::take(&mut self.pages);
        let mut page_refs = Vec::with_capacity(pending.len());

        for page in pending {
            let mut xobjects = Dictionary::new();
            if let Some(image_id) = page.image {
                xobjects.set(PAGE_IMAGE_NAME, Object::Reference(image_id));
            }
            let mut resources = Dictionary::new();
            resources.set("XObject", Object::Dictionary(xobjects));

            let content_id = self
                .doc
                .add_object(Stream::new(Dictionary::new(), page.content.into_bytes()));

            let mut page_dict = Dictionary::new();
            page_dict.set("Type", Object::Name(b"Page".to_vec()));
            page_dict.set("Parent", Object::Reference(pages_id));
            page_dict.set("MediaBox", media_box.clone());
            page_dict.set("Resources", Object::Dictionary(resources));
            page_dict.set("Contents", Object::Reference(content_id));

            page_refs.push(Object::Reference(self.doc.add_object(page_dict)));
        }

        let count = page_refs.len() as i64;
        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Kids", Object::Array(page_refs));
        pages_dict.set("Count", Object::Integer(count));
        self.doc
            .objects
            .insert(pages_id, Object::Dictionary(pages_dict));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = self.doc.add_object(catalog);

        let mut info = Dictionary::new();
        info.set("Title", Object::string_literal(title));
        info.set("Producer", Object::string_literal(PRODUCER));
        let info_id = self.doc.add_object(info);

        self.doc.trailer.set("Root", Object::Reference(catalog_id));
        self.doc.trailer.set("Info", Object::Reference(info_id));

        let mut writer = Vec::new();
        self.doc.save_to(&mut writer)?;
        Ok(writer)
    }
}

/// Generate the content stream command that draws an image XObject.
///
/// Image XObjects occupy the unit square, so the transform scales it to the
/// rendered size and moves it to the placement origin.
fn placement_command(xobject_name: &str, rect: &Rect) -> String {
    format!(
        "q {:.4} 0 0 {:.4} {:.4} {:.4} cm /{} Do Q\n",
        rect.width, rect.height, rect.x, rect.y, xobject_name
    )
}
