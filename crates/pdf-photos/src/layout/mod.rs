//! Layout calculation for photo pages
//!
//! Every image gets one page. The image is scaled to the largest size that
//! fits entirely inside the page ("contain" semantics) and centered.

mod placement;
mod types;

pub use placement::*;
pub use types::*;
