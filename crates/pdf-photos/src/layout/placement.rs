//! Image placement within a page
//!
//! The image is scaled so that it fits entirely within the page while
//! preserving its aspect ratio, then centered on both axes.

use crate::types::{PageSize, PhotoPdfError, Result};

use super::{FitAxis, PagePlacement, Rect};

/// Calculate the placement of an image on a page.
///
/// An image relatively wider than the page spans the page width; every other
/// image, including one whose aspect ratio equals the page's exactly, spans
/// the page height.
///
/// # Arguments
/// * `image_width` - Intrinsic image width in pixels
/// * `image_height` - Intrinsic image height in pixels
/// * `page` - Target page size
///
/// # Errors
/// `InvalidImage` if either image dimension is zero, negative or not finite,
/// `Config` if the page size is not positive.
pub fn compute_placement(
    image_width: f32,
    image_height: f32,
    page: PageSize,
) -> Result<PagePlacement> {
    if !is_positive(image_width) || !is_positive(image_height) {
        return Err(PhotoPdfError::InvalidImage {
            index: None,
            width: image_width,
            height: image_height,
        });
    }
    page.validate()?;

    let image_aspect = image_width / image_height;
    let page_aspect = page.aspect_ratio();

    let (render_width, render_height, fit) = if image_aspect > page_aspect {
        (page.width, page.width / image_aspect, FitAxis::Width)
    } else {
        (page.height * image_aspect, page.height, FitAxis::Height)
    };

    let x = (page.width - render_width) / 2.0;
    let y = (page.height - render_height) / 2.0;

    Ok(PagePlacement {
        content_rect: Rect::new(x, y, render_width, render_height),
        scale: render_width / image_width,
        fit,
    })
}

/// Calculate placements for a sequence of images, one page each, in order.
///
/// # Arguments
/// * `dimensions` - (width, height) in pixels for each image
/// * `page` - Target page size shared by every page
pub fn plan_pages(dimensions: &[(u32, u32)], page: PageSize) -> Result<Vec<PagePlacement>> {
    dimensions
        .iter()
        .enumerate()
        .map(|(index, &(width, height))| {
            compute_placement(width as f32, height as f32, page).map_err(|e| e.at_index(index))
        })
        .collect()
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn a4_mm() -> PageSize {
        PageSize::new(210.0, 297.0)
    }

    #[test]
    fn test_landscape_photo_on_portrait_page() {
        let placement = compute_placement(1600.0, 1200.0, a4_mm()).unwrap();

        assert_eq!(placement.fit, FitAxis::Width);
        assert_eq!(placement.render_width(), 210.0);
        assert!((placement.render_height() - 157.5).abs() < EPSILON);
        assert!(placement.x_offset().abs() < EPSILON);
        assert!((placement.y_offset() - 69.75).abs() < EPSILON);
    }

    #[test]
    fn test_tall_photo_is_height_constrained() {
        // 3:4 (0.75) is still wider than A4 (≈0.707)
        let placement = compute_placement(900.0, 1200.0, a4_mm()).unwrap();
        assert_eq!(placement.fit, FitAxis::Width);

        // 1:2 is taller than the page
        let placement = compute_placement(500.0, 1000.0, a4_mm()).unwrap();
        assert_eq!(placement.fit, FitAxis::Height);
        assert_eq!(placement.render_height(), 297.0);
        assert!((placement.render_width() - 148.5).abs() < EPSILON);
        assert!((placement.x_offset() - 30.75).abs() < EPSILON);
        assert!(placement.y_offset().abs() < EPSILON);
    }

    #[test]
    fn test_equal_aspect_routes_to_height_branch() {
        let placement = compute_placement(420.0, 594.0, a4_mm()).unwrap();

        assert_eq!(placement.fit, FitAxis::Height);
        assert_eq!(placement.render_height(), 297.0);
        assert!((placement.render_width() - 210.0).abs() < EPSILON);
        assert!(placement.x_offset().abs() < EPSILON);
        assert_eq!(placement.y_offset(), 0.0);
    }

    #[test]
    fn test_scale_maps_pixels_to_page_units() {
        let placement = compute_placement(2100.0, 1000.0, a4_mm()).unwrap();
        assert!((placement.scale - 0.1).abs() < 1e-6);
        assert!((placement.render_height() - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_small_images_are_upscaled() {
        let placement = compute_placement(30.0, 40.0, a4_mm()).unwrap();
        assert!((placement.scale - 7.0).abs() < EPSILON);
    }

    #[test]
    fn test_fits_centers_and_preserves_aspect() {
        let pages = [
            PageSize::new(210.0, 297.0),
            PageSize::new(297.0, 210.0),
            PageSize::new(612.0, 792.0),
            PageSize::new(100.0, 100.0),
        ];
        let images = [
            (1.0, 1.0),
            (1600.0, 1200.0),
            (1200.0, 1600.0),
            (4000.0, 10.0),
            (10.0, 4000.0),
            (333.0, 777.0),
            (1920.0, 1080.0),
        ];

        for page in pages {
            for (w, h) in images {
                let p = compute_placement(w, h, page).unwrap();
                let r = p.content_rect;

                assert!(r.width <= page.width + EPSILON, "{w}x{h} overflows width");
                assert!(r.height <= page.height + EPSILON, "{w}x{h} overflows height");

                assert!((r.x - (page.width - r.width) / 2.0).abs() < EPSILON);
                assert!((r.y - (page.height - r.height) / 2.0).abs() < EPSILON);
                assert!((r.center_x() - page.width / 2.0).abs() < EPSILON);
                assert!((r.center_y() - page.height / 2.0).abs() < EPSILON);

                let touches_width = (r.width - page.width).abs() < EPSILON;
                let touches_height = (r.height - page.height).abs() < EPSILON;
                assert!(touches_width || touches_height, "{w}x{h} touches no edge");

                let expected = w / h;
                let actual = r.width / r.height;
                assert!(
                    (actual - expected).abs() / expected < 1e-4,
                    "aspect {actual} != {expected}"
                );
            }
        }
    }

    #[test]
    fn test_zero_dimensions_are_invalid() {
        for (w, h) in [(0.0, 100.0), (100.0, 0.0), (-5.0, 10.0), (f32::NAN, 10.0)] {
            match compute_placement(w, h, a4_mm()) {
                Err(PhotoPdfError::InvalidImage { index: None, .. }) => {}
                other => panic!("Expected InvalidImage for {w}x{h}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_invalid_page_is_config_error() {
        let result = compute_placement(10.0, 10.0, PageSize::new(0.0, 297.0));
        assert!(matches!(result, Err(PhotoPdfError::Config(_))));
    }

    #[test]
    fn test_plan_pages_reports_failing_index() {
        let result = plan_pages(&[(10, 10), (20, 20), (0, 20)], a4_mm());
        match result {
            Err(err @ PhotoPdfError::InvalidImage { .. }) => {
                assert_eq!(err.image_index(), Some(2));
            }
            other => panic!("Expected InvalidImage, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_pages_keeps_order() {
        let placements = plan_pages(&[(1600, 1200), (500, 1000)], a4_mm()).unwrap();
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].fit, FitAxis::Width);
        assert_eq!(placements[1].fit, FitAxis::Height);
    }
}
