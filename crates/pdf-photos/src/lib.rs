pub mod assemble;
pub mod constants;
pub mod decode;
pub mod layout;
mod options;
pub mod output;
pub mod render;
pub mod resources;
mod types;

pub use assemble::{
    assemble_document, assemble_document_tracked, load_image, load_images, save_pdf,
};
pub use decode::{DecodedImage, decode_image, probe_dimensions};
pub use layout::{FitAxis, PagePlacement, Rect, compute_placement, plan_pages};
pub use options::*;
pub use output::{DownloadFile, PhotoDocument, PreviewStream};
pub use resources::{ResourceKind, ResourceLease, ResourceTracker};
pub use types::*;
