//! Layout data types for photo pages

/// Which page axis limits the scaled image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitAxis {
    /// Image is relatively wider than the page; it spans the full page width
    Width,
    /// Image is relatively taller than (or as tall as) the page; it spans the
    /// full page height
    Height,
}

/// A rectangular area in page units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge in PDF space)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Placement of one image on its page
///
/// `content_rect` holds the rendered size and the offsets from the page
/// edges. The image is centered, so the vertical offset is the same whether
/// it is measured from the top or the bottom of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    /// Position and size of the image on the page
    pub content_rect: Rect,
    /// Scale factor from image pixels to page units
    pub scale: f32,
    /// The axis on which the image touches the page edges
    pub fit: FitAxis,
}

impl PagePlacement {
    pub fn render_width(&self) -> f32 {
        self.content_rect.width
    }

    pub fn render_height(&self) -> f32 {
        self.content_rect.height
    }

    pub fn x_offset(&self) -> f32 {
        self.content_rect.x
    }

    pub fn y_offset(&self) -> f32 {
        self.content_rect.y
    }
}
