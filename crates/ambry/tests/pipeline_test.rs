//! Tests for reading stored objects through transforms.

use ambry::{
    AmbryErrorKind, FileSystemStorage, Params, ResizeTransform, Storage, TransformErrorKind,
    read_transformed,
};
use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage};
use std::io::Cursor;
use tempfile::TempDir;

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

fn setup() -> (TempDir, FileSystemStorage, ResizeTransform) {
    let dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(dir.path()).unwrap();
    storage.create_bucket("photos").unwrap();
    let transform = ResizeTransform::from_params(
        "thumb",
        &Params::new()
            .with("width", 100)
            .with("height", 100)
            .with("fit", "contain")
            .with("format", "png"),
    )
    .unwrap();
    (dir, storage, transform)
}

#[test]
fn test_read_through_resize() {
    let (_dir, storage, transform) = setup();
    storage.write_bytes("photos", "wide.png", &png(400, 200)).unwrap();

    let mut output = Vec::new();
    let mime = read_transformed(&storage, "photos", "wide.png", &transform, &mut output).unwrap();

    assert_eq!(mime, "image/png");
    let image = image::load_from_memory(&output).unwrap();
    assert_eq!(image.dimensions(), (100, 50));
    // stored original is untouched
    assert_eq!(storage.read_bytes("photos", "wide.png").unwrap(), png(400, 200));
}

#[test]
fn test_unsupported_content_type() {
    let (_dir, storage, transform) = setup();
    storage.write_bytes("photos", "notes.txt", b"hello").unwrap();

    let mut output = Vec::new();
    let err = read_transformed(&storage, "photos", "notes.txt", &transform, &mut output)
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        AmbryErrorKind::Transform(e) if matches!(e.kind(), TransformErrorKind::UnsupportedMimeType(_))
    ));
}

#[test]
fn test_missing_file() {
    let (_dir, storage, transform) = setup();
    let mut output = Vec::new();
    let err = read_transformed(&storage, "photos", "gone.png", &transform, &mut output)
        .unwrap_err();
    assert!(err.is_no_such_file());
}

#[test]
fn test_corrupt_image() {
    let (_dir, storage, transform) = setup();
    storage.write_bytes("photos", "broken.png", b"not a png").unwrap();

    let mut output = Vec::new();
    let err = read_transformed(&storage, "photos", "broken.png", &transform, &mut output)
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        AmbryErrorKind::Transform(e) if matches!(e.kind(), TransformErrorKind::Decode(_))
    ));
}
