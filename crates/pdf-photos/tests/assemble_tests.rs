use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use lopdf::Document;
use pdf_photos::*;
use std::io::Cursor;

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

fn png(width: u32, height: u32) -> SourceImage {
    let img = RgbImage::from_pixel(width, height, Rgb([10, 120, 200]));
    SourceImage::new(
        format!("{width}x{height}.png"),
        encode(DynamicImage::ImageRgb8(img), ImageFormat::Png),
    )
}

fn jpeg(width: u32, height: u32) -> SourceImage {
    let img = RgbImage::from_pixel(width, height, Rgb([220, 180, 40]));
    SourceImage::new(
        format!("{width}x{height}.jpg"),
        encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg),
    )
}

/// A JPEG stored as `width`x`height` pixels with EXIF Orientation=6
/// (displayed rotated 90 degrees clockwise)
fn rotated_phone_photo(width: u32, height: u32) -> SourceImage {
    let jpeg = jpeg(width, height).bytes.to_vec();
    #[rustfmt::skip]
    let app1 = [
        0xFF, 0xE1, 0x00, 0x22,
        b'E', b'x', b'i', b'f', 0, 0,
        b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08,
        0x00, 0x01,
        0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x06, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
    ];
    let mut bytes = jpeg[..2].to_vec();
    bytes.extend_from_slice(&app1);
    bytes.extend_from_slice(&jpeg[2..]);
    SourceImage::new("portrait.jpg", bytes)
}

fn broken(label: &str) -> SourceImage {
    SourceImage::new(label, b"definitely not an image".to_vec())
}

/// Pixel size of the image XObject on each page, in page order
fn page_image_sizes(bytes: &[u8]) -> Vec<(i64, i64)> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let page = doc.get_dictionary(page_id).unwrap();
            let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
            let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
            let image_id = xobjects.get(b"Im0").unwrap().as_reference().unwrap();
            let stream = doc.get_object(image_id).unwrap().as_stream().unwrap();
            (
                stream.dict.get(b"Width").unwrap().as_i64().unwrap(),
                stream.dict.get(b"Height").unwrap().as_i64().unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_empty_input_is_no_op() {
    let result = assemble_document(&[], &PhotoPdfOptions::default()).await;
    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn test_empty_input_skips_validation() {
    let options = PhotoPdfOptions {
        jpeg_quality: 0,
        ..Default::default()
    };
    assert!(matches!(assemble_document(&[], &options).await, Ok(None)));
}

#[tokio::test]
async fn test_one_page_per_image_in_order() {
    let images = vec![png(40, 30), jpeg(30, 40), png(50, 50), jpeg(64, 16), png(16, 64)];

    let doc = assemble_document(&images, &PhotoPdfOptions::default())
        .await
        .unwrap()
        .expect("document expected");

    assert_eq!(doc.page_count(), 5);
    assert_eq!(
        page_image_sizes(doc.bytes()),
        vec![(40, 30), (30, 40), (50, 50), (64, 16), (16, 64)]
    );
}

#[tokio::test]
async fn test_reordering_reorders_pages() {
    let options = PhotoPdfOptions::default();
    let mut images = vec![png(40, 30), png(30, 40), png(50, 50)];

    let first = assemble_document(&images, &options).await.unwrap().unwrap();
    assert_eq!(
        page_image_sizes(first.bytes()),
        vec![(40, 30), (30, 40), (50, 50)]
    );

    // Move the last image to the front
    let moved = images.remove(2);
    images.insert(0, moved);

    let second = assemble_document(&images, &options).await.unwrap().unwrap();
    assert_eq!(
        page_image_sizes(second.bytes()),
        vec![(50, 50), (40, 30), (30, 40)]
    );
}

#[tokio::test]
async fn test_pages_use_configured_size_and_placement() {
    let options = PhotoPdfOptions::default();
    let page = options.page_size();
    let doc = assemble_document(&[png(1600, 1200)], &options)
        .await
        .unwrap()
        .unwrap();

    let pdf = Document::load_mem(doc.bytes()).unwrap();
    let page_id = *pdf.get_pages().values().next().unwrap();
    let media_box = pdf
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect::<Vec<_>>();
    assert!((media_box[2] - page.width).abs() < 0.01);
    assert!((media_box[3] - page.height).abs() < 0.01);

    let content = String::from_utf8(pdf.get_page_content(page_id).unwrap()).unwrap();
    assert!(content.contains("/Im0 Do"), "content: {content}");

    let placement = doc.placements()[0];
    assert_eq!(placement.fit, FitAxis::Width);
    assert!((placement.render_width() - page.width).abs() < 0.01);
    assert!((placement.y_offset() - (page.height - placement.render_height()) / 2.0).abs() < 0.01);
}

#[tokio::test]
async fn test_exif_rotated_photo_is_placed_upright() {
    let images = vec![rotated_phone_photo(40, 20)];
    let doc = assemble_document(&images, &PhotoPdfOptions::default())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(doc.placements()[0].fit, FitAxis::Height);
    assert_eq!(page_image_sizes(doc.bytes()), vec![(20, 40)]);

    // Planning from headers agrees with the built document
    let dims = probe_dimensions(&images).await.unwrap();
    let planned = plan_pages(&dims, doc.page_size()).unwrap();
    assert_eq!(planned, doc.placements());
}

#[tokio::test]
async fn test_every_image_is_reencoded_as_jpeg() {
    let rgba = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 128]));
    let images = vec![
        SourceImage::new(
            "alpha.png",
            encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Png),
        ),
        jpeg(8, 8),
    ];
    let doc = assemble_document(&images, &PhotoPdfOptions::default())
        .await
        .unwrap()
        .unwrap();

    let pdf = Document::load_mem(doc.bytes()).unwrap();
    for page_id in pdf.get_pages().values() {
        let page = pdf.get_dictionary(*page_id).unwrap();
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
        let image_id = xobjects.get(b"Im0").unwrap().as_reference().unwrap();
        let stream = pdf.get_object(image_id).unwrap().as_stream().unwrap();
        assert_eq!(
            stream.dict.get(b"Filter").unwrap().as_name().unwrap(),
            b"DCTDecode"
        );
        assert_eq!(&stream.content[..2], &[0xFF, 0xD8]);
    }
}

#[tokio::test]
async fn test_decode_failure_aborts_and_releases() {
    let tracker = ResourceTracker::new();
    let images = vec![png(10, 10), png(20, 10), broken("third.png"), png(10, 20), png(5, 5)];

    let result = assemble_document_tracked(&images, &PhotoPdfOptions::default(), &tracker).await;

    match result {
        Err(PhotoPdfError::ImageDecode { index, .. }) => assert_eq!(index, 2),
        other => panic!("Expected ImageDecode error, got {other:?}"),
    }
    assert_eq!(tracker.live(), 0, "decoded images leaked after abort");
}

#[tokio::test]
async fn test_successful_assembly_releases_decoded_images() {
    let tracker = ResourceTracker::new();
    let doc = assemble_document_tracked(&[png(10, 10), png(12, 12)], &PhotoPdfOptions::default(), &tracker)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(doc.page_count(), 2);
    assert_eq!(tracker.live_of(ResourceKind::DecodedImage), 0);
}

#[tokio::test]
async fn test_invalid_options_rejected() {
    let options = PhotoPdfOptions {
        jpeg_quality: 0,
        ..Default::default()
    };
    let result = assemble_document(&[png(10, 10)], &options).await;
    assert!(matches!(result, Err(PhotoPdfError::Config(_))));
}

#[tokio::test]
async fn test_preview_and_download_share_one_document() {
    let tracker = ResourceTracker::new();
    let doc = assemble_document(&[png(30, 20), png(20, 30)], &PhotoPdfOptions::default())
        .await
        .unwrap()
        .unwrap();

    let preview = doc.preview(&tracker);
    let download = doc.download("photos.pdf");

    assert_eq!(preview.bytes(), doc.bytes());
    assert_eq!(&download.bytes[..], doc.bytes());
    assert_eq!(preview.mime_type(), "application/pdf");
    assert_eq!(preview.page_count(), 2);
    assert_eq!(download.file_name, "photos.pdf");
    assert!(doc.bytes().starts_with(b"%PDF-1.7"));

    assert!(tracker.is_live(preview.handle_id()));
    drop(preview);
    assert_eq!(tracker.live_of(ResourceKind::PreviewStream), 0);
}

#[tokio::test]
async fn test_title_written_to_info() {
    let options = PhotoPdfOptions {
        title: "Trip".to_string(),
        ..Default::default()
    };
    let doc = assemble_document(&[png(4, 4)], &options).await.unwrap().unwrap();
    assert_eq!(doc.title(), "Trip");

    let pdf = Document::load_mem(doc.bytes()).unwrap();
    let info_id = pdf.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = pdf.get_dictionary(info_id).unwrap();
    assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Trip");
}

#[tokio::test]
async fn test_landscape_option_rotates_pages() {
    let options = PhotoPdfOptions {
        orientation: Orientation::Landscape,
        ..Default::default()
    };
    let doc = assemble_document(&[png(40, 30)], &options).await.unwrap().unwrap();
    let page = doc.page_size();
    assert!(page.width > page.height);
    assert_eq!(doc.placements()[0].fit, FitAxis::Height);
}

#[tokio::test]
async fn test_load_images_and_save_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.jpg");
    std::fs::write(&a, &png(10, 20).bytes[..]).unwrap();
    std::fs::write(&b, &jpeg(20, 10).bytes[..]).unwrap();

    let images = load_images(&[&a, &b]).await.unwrap();
    assert_eq!(images[0].label, "a.png");
    assert_eq!(images[1].label, "b.jpg");

    let doc = assemble_document(&images, &PhotoPdfOptions::default())
        .await
        .unwrap()
        .unwrap();

    let out = dir.path().join("out.pdf");
    save_pdf(&doc, &out).await.unwrap();
    let loaded = Document::load(&out).unwrap();
    assert_eq!(loaded.get_pages().len(), 2);

    let saved = doc.download("named.pdf").save_to_dir(dir.path()).await.unwrap();
    assert_eq!(saved, dir.path().join("named.pdf"));
    assert_eq!(std::fs::read(saved).unwrap(), doc.bytes());
}

#[tokio::test]
async fn test_load_missing_file_is_io_error() {
    let result = load_image("/definitely/not/here.png").await;
    assert!(matches!(result, Err(PhotoPdfError::Io(_))));
}
