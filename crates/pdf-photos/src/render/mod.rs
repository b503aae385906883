//! PDF rendering for photo documents
//!
//! - Re-encoding page images and wrapping them as Image XObjects
//! - Writing one page per image and serializing the page tree

mod page;
mod xobject;

pub use page::PageWriter;
pub use xobject::{EncodedImage, encode_jpeg, image_xobject};
