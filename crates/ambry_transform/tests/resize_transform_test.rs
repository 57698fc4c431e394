//! Tests for the image resize transform.

use ambry_config::Params;
use ambry_error::{AmbryErrorKind, TransformErrorKind};
use ambry_transform::{FitStrategy, ResizeTransform, Transform};
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

fn encode_png(image: RgbImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

fn solid_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(RgbImage::from_pixel(width, height, Rgb([200, 100, 50])))
}

fn resize(params: Params) -> ResizeTransform {
    ResizeTransform::from_params("test", &params).unwrap()
}

fn run(transform: &ResizeTransform, input: &[u8]) -> DynamicImage {
    let mut output = Vec::new();
    transform
        .apply(&mut Cursor::new(input), &mut output)
        .unwrap();
    image::load_from_memory(&output).unwrap()
}

fn transform_kind(err: &ambry_error::AmbryError) -> Option<&TransformErrorKind> {
    match err.kind() {
        AmbryErrorKind::Transform(e) => Some(e.kind()),
        _ => None,
    }
}

#[test]
fn test_defaults() {
    let transform = resize(Params::new().with("width", 10).with("height", 20));
    assert_eq!(transform.name(), "test");
    assert_eq!(*transform.fit(), FitStrategy::Cover);
    assert_eq!(*transform.quality(), 80);
    assert_eq!(transform.format(), "webp");
    assert_eq!(transform.output_mime_type("image/png"), "image/webp");
}

fn noise_png(width: u32, height: u32) -> Vec<u8> {
    let mut state: u32 = 0x2545_f491;
    encode_png(RgbImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        Rgb([r, g, b])
    }))
}

fn encode_at_quality(quality: i64, input: &[u8]) -> Vec<u8> {
    let transform = resize(
        Params::new()
            .with("width", 128)
            .with("height", 128)
            .with("quality", quality),
    );
    let mut output = Vec::new();
    transform
        .apply(&mut Cursor::new(input), &mut output)
        .unwrap();
    output
}

#[test]
fn test_webp_honours_quality() {
    let input = noise_png(256, 256);
    let low = encode_at_quality(5, &input);
    let high = encode_at_quality(95, &input);

    assert_eq!(image::guess_format(&low).unwrap(), ImageFormat::WebP);
    assert_ne!(low, high);
    assert!(low.len() < high.len());
    assert_eq!(image::load_from_memory(&low).unwrap().dimensions(), (128, 128));
}

#[test]
fn test_default_output_is_webp() {
    let transform = resize(Params::new().with("width", 16).with("height", 16));
    let mut output = Vec::new();
    transform
        .apply(&mut Cursor::new(solid_png(32, 32)), &mut output)
        .unwrap();
    assert_eq!(image::guess_format(&output).unwrap(), ImageFormat::WebP);
}

#[test]
fn test_cover_wide_source_crops_center() {
    // left half red, right half blue; the centered crop keeps both halves
    let source = RgbImage::from_fn(400, 200, |x, _| {
        if x < 200 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) }
    });
    let transform = resize(
        Params::new()
            .with("width", 100)
            .with("height", 100)
            .with("format", "png"),
    );

    let output = run(&transform, &encode_png(source));

    assert_eq!(output.dimensions(), (100, 100));
    let left = output.get_pixel(5, 50);
    let right = output.get_pixel(95, 50);
    assert!(left[0] > 200 && left[2] < 50);
    assert!(right[2] > 200 && right[0] < 50);
}

#[test]
fn test_cover_tall_source_keeps_lower_two_thirds() {
    // a 200x400 source loses 200 rows: 67 from the top, 133 from the bottom
    let source = RgbImage::from_fn(200, 400, |_, y| {
        if y < 67 {
            Rgb([0, 255, 0])
        } else if y < 267 {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });
    let transform = resize(
        Params::new()
            .with("width", 100)
            .with("height", 100)
            .with("fit", "cover")
            .with("format", "png"),
    );

    let output = run(&transform, &encode_png(source)).to_rgb8();

    assert_eq!(output.dimensions(), (100, 100));
    for (x, y) in [(0, 0), (99, 0), (50, 50), (0, 99), (99, 99)] {
        let pixel = output.get_pixel(x, y);
        assert!(pixel.0.iter().all(|c| *c > 250), "pixel {:?} at {},{}", pixel, x, y);
    }
}

#[test]
fn test_contain_wide_source() {
    let transform = resize(
        Params::new()
            .with("width", 100)
            .with("height", 100)
            .with("fit", "contain")
            .with("format", "png"),
    );
    let output = run(&transform, &solid_png(400, 200));
    assert_eq!(output.dimensions(), (100, 50));
}

#[test]
fn test_contain_tall_source() {
    let transform = resize(
        Params::new()
            .with("width", 100)
            .with("height", 100)
            .with("fit", "contain")
            .with("format", "png"),
    );
    let output = run(&transform, &solid_png(200, 400));
    assert_eq!(output.dimensions(), (50, 100));
}

#[test]
fn test_fill_ignores_aspect_ratio() {
    let transform = resize(
        Params::new()
            .with("width", 30)
            .with("height", 70)
            .with("fit", "fill")
            .with("format", "png"),
    );
    let output = run(&transform, &solid_png(400, 200));
    assert_eq!(output.dimensions(), (30, 70));
}

#[test]
fn test_unknown_fit_falls_back_to_cover() {
    let transform = resize(
        Params::new()
            .with("width", 100)
            .with("height", 100)
            .with("fit", "stretch")
            .with("format", "png"),
    );
    assert_eq!(*transform.fit(), FitStrategy::Cover);
    let output = run(&transform, &solid_png(400, 200));
    assert_eq!(output.dimensions(), (100, 100));
}

#[test]
fn test_jpeg_output() {
    let transform = resize(
        Params::new()
            .with("width", 20)
            .with("height", 20)
            .with("format", "jpg")
            .with("quality", 50),
    );
    let mut output = Vec::new();
    transform
        .apply(&mut Cursor::new(solid_png(40, 40)), &mut output)
        .unwrap();
    assert_eq!(image::guess_format(&output).unwrap(), ImageFormat::Jpeg);
    assert_eq!(transform.output_mime_type("image/png"), "image/jpeg");
}

#[test]
fn test_string_dimensions_accepted() {
    let transform = resize(Params::new().with("width", "64").with("height", "32"));
    assert_eq!(*transform.width(), 64);
    assert_eq!(*transform.height(), 32);
}

#[test]
fn test_invalid_configuration() {
    let cases = [
        Params::new().with("height", 10),
        Params::new().with("width", "wide").with("height", 10),
        Params::new().with("width", 0).with("height", 10),
        Params::new().with("width", -5).with("height", 10),
        Params::new().with("width", 10).with("height", 10).with("quality", 150),
    ];
    for params in cases {
        let err = ResizeTransform::from_params("bad", &params).unwrap_err();
        assert!(err.is_config(), "expected config error for {:?}", params);
    }
}

#[test]
fn test_corrupt_input_is_decode_error() {
    let transform = resize(Params::new().with("width", 10).with("height", 10));
    let mut output = Vec::new();
    let err = transform
        .apply(&mut Cursor::new(b"definitely not an image".to_vec()), &mut output)
        .unwrap_err();
    assert!(matches!(transform_kind(&err), Some(TransformErrorKind::Decode(_))));
    assert!(output.is_empty());
}

#[test]
fn test_unsupported_format_is_encode_error() {
    let transform = resize(
        Params::new()
            .with("width", 10)
            .with("height", 10)
            .with("format", "bmp"),
    );
    let mut output = Vec::new();
    let err = transform
        .apply(&mut Cursor::new(solid_png(20, 20)), &mut output)
        .unwrap_err();
    assert!(matches!(transform_kind(&err), Some(TransformErrorKind::Encode(_))));
    assert!(output.is_empty());
}

#[test]
fn test_schema_without_instance() {
    let schema = ResizeTransform::schema();
    assert!(*schema["width"].required());
    assert!(*schema["height"].required());
    assert!(!*schema["fit"].required());
    assert_eq!(schema["fit"].options(), &["fill", "cover", "contain"]);
    assert_eq!(schema["fit"].default(), &Some(serde_json::json!("cover")));
    assert_eq!(schema["quality"].default(), &Some(serde_json::json!(80)));
    assert_eq!(schema["format"].options(), &["webp", "png", "jpg", "jpeg"]);
}

#[test]
fn test_accepts_images_only() {
    let transform = resize(Params::new().with("width", 10).with("height", 10));
    assert_eq!(transform.for_mime_types(), &["image/*"]);
    assert!(transform.accepts("image/jpeg"));
    assert!(!transform.accepts("application/pdf"));
}
