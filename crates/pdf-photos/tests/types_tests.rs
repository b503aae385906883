use pdf_photos::*;

#[test]
fn test_paper_size_dimensions() {
    assert_eq!(PaperSize::A4.dimensions_mm(), (210.0, 297.0));
    assert_eq!(PaperSize::A3.dimensions_mm(), (297.0, 420.0));
    assert_eq!(PaperSize::A5.dimensions_mm(), (148.0, 210.0));
    assert_eq!(PaperSize::Letter.dimensions_mm(), (215.9, 279.4));
    assert_eq!(PaperSize::Legal.dimensions_mm(), (215.9, 355.6));
    assert_eq!(PaperSize::Tabloid.dimensions_mm(), (279.4, 431.8));

    let custom = PaperSize::Custom {
        width_mm: 100.0,
        height_mm: 200.0,
    };
    assert_eq!(custom.dimensions_mm(), (100.0, 200.0));
}

#[test]
fn test_orientation_swaps_dimensions() {
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Landscape),
        (297.0, 210.0)
    );
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Portrait),
        (210.0, 297.0)
    );
}

#[test]
fn test_default_page_is_a4_portrait_in_points() {
    let page = PageSize::default();
    assert!((page.width - 595.2756).abs() < 0.01);
    assert!((page.height - 841.8898).abs() < 0.01);
    assert!(page.height > page.width);
}

#[test]
fn test_page_size_validation() {
    assert!(PageSize::new(10.0, 10.0).validate().is_ok());
    assert!(PageSize::new(0.0, 10.0).validate().is_err());
    assert!(PageSize::new(10.0, -1.0).validate().is_err());
    assert!(PageSize::new(f32::INFINITY, 10.0).validate().is_err());
}

#[test]
fn test_unit_conversion() {
    use pdf_photos::constants::{mm_to_pt, pt_to_mm};
    assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-4);
    assert!((pt_to_mm(72.0) - 25.4).abs() < 1e-4);
}

#[test]
fn test_error_messages() {
    let err = PhotoPdfError::InvalidImage {
        index: Some(2),
        width: 0.0,
        height: 10.0,
    };
    assert_eq!(err.to_string(), "Invalid image 2: dimensions 0x10");
    assert_eq!(err.image_index(), Some(2));

    let err = PhotoPdfError::InvalidImage {
        index: None,
        width: 5.0,
        height: 0.0,
    };
    assert_eq!(err.to_string(), "Invalid image: dimensions 5x0");
    assert_eq!(err.image_index(), None);

    assert_eq!(PhotoPdfError::Config("x".into()).image_index(), None);
}

#[test]
fn test_source_image_shares_bytes() {
    let image = SourceImage::new("a.jpg", vec![1u8, 2, 3]);
    let copy = image.clone();
    assert!(std::sync::Arc::ptr_eq(&image.bytes, &copy.bytes));
    assert_eq!(copy.label, "a.jpg");
}
