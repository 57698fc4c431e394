//! Image resize transform.

use crate::geometry::{contain_size, cover_crop};
use crate::{ConfigSchema, ParameterSpec, Transform};
use ambry_config::Params;
use ambry_error::{AmbryResult, ConfigError, TransformError, TransformErrorKind};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use std::io::{Read, Write};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// How an image is mapped onto the target dimensions.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FitStrategy {
    /// Stretch to exactly the target size, ignoring aspect ratio
    Fill,
    /// Crop to the target aspect ratio, then scale to exactly the target size
    #[default]
    Cover,
    /// Scale to fit inside the target size, keeping all content
    Contain,
}

/// Encoded output format.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum OutputFormat {
    /// WebP, lossy at the configured quality
    #[strum(serialize = "webp")]
    Webp,
    /// PNG
    #[strum(serialize = "png")]
    Png,
    /// JPEG at the configured quality
    #[strum(to_string = "jpeg", serialize = "jpg")]
    Jpeg,
}

impl OutputFormat {
    /// Content type of images in this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Webp => "image/webp",
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }
}

const DEFAULT_QUALITY: u8 = 80;
const DEFAULT_FORMAT: &str = "webp";
const MIME_TYPES: &[&str] = &["image/*"];

/// Resizes images with one of three fit strategies.
///
/// Parameters:
///
/// | Name | Type | Default |
/// |---|---|---|
/// | `width` | integer, required | |
/// | `height` | integer, required | |
/// | `fit` | `fill` \| `cover` \| `contain` | `cover` |
/// | `quality` | integer 0-100 | `80` |
/// | `format` | `webp` \| `png` \| `jpg` \| `jpeg` | `webp` |
///
/// An unrecognised `fit` logs a warning and behaves as `cover`. An
/// unsupported `format` is reported as an encode error when applied.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ResizeTransform {
    name: String,
    width: u32,
    height: u32,
    fit: FitStrategy,
    quality: u8,
    format: String,
}

impl ResizeTransform {
    /// Type key used to select this transform in configuration.
    pub const TYPE_NAME: &'static str = "resize";

    /// Parameters accepted by [`from_params`](Self::from_params).
    pub fn schema() -> ConfigSchema {
        let mut formats: Vec<String> = OutputFormat::iter()
            .filter(|f| *f != OutputFormat::Jpeg)
            .map(|f| f.to_string())
            .collect();
        formats.extend(["jpg".to_string(), "jpeg".to_string()]);

        ConfigSchema::new()
            .with("width", ParameterSpec::required_integer("Width of the image"))
            .with("height", ParameterSpec::required_integer("Height of the image"))
            .with(
                "fit",
                ParameterSpec::select(
                    "How the image is fitted to the given width and height",
                    FitStrategy::iter().map(|f| f.to_string()),
                    FitStrategy::Cover.as_ref(),
                ),
            )
            .with(
                "quality",
                ParameterSpec::integer("Quality of the image, 0-100", i64::from(DEFAULT_QUALITY)),
            )
            .with(
                "format",
                ParameterSpec::select("Format of the image", formats, DEFAULT_FORMAT),
            )
    }

    /// Build a resize transform from configuration parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `width` or `height` is missing, not an
    /// integer or not positive, or if `quality` is outside 0-100.
    #[instrument(skip(params))]
    pub fn from_params(name: &str, params: &Params) -> AmbryResult<Self> {
        Self::schema().validate(params)?;

        let width = dimension(params, "width")?;
        let height = dimension(params, "height")?;

        let fit = match params.str_param("fit")? {
            None => FitStrategy::default(),
            Some(value) => FitStrategy::from_str(value).unwrap_or_else(|_| {
                warn!(fit = value, "Unknown fit. Using cover");
                FitStrategy::Cover
            }),
        };

        let quality = params
            .int_param("quality")?
            .unwrap_or(i64::from(DEFAULT_QUALITY));
        let quality = u8::try_from(quality)
            .ok()
            .filter(|q| *q <= 100)
            .ok_or_else(|| {
                ConfigError::new(format!("Parameter 'quality' must be 0-100, got {}", quality))
            })?;

        let format = params
            .str_param("format")?
            .unwrap_or(DEFAULT_FORMAT)
            .to_string();

        debug!(width, height, %fit, quality, format = %format, "Configured resize transform");
        Ok(Self {
            name: name.to_string(),
            width,
            height,
            fit,
            quality,
            format,
        })
    }

    /// Apply the configured fit strategy to a decoded image.
    pub fn resize_image(&self, image: &DynamicImage) -> DynamicImage {
        match self.fit {
            FitStrategy::Fill => image.resize_exact(self.width, self.height, FilterType::Triangle),
            FitStrategy::Cover => self.cover(image),
            FitStrategy::Contain => self.contain(image),
        }
    }

    fn cover(&self, image: &DynamicImage) -> DynamicImage {
        info!(
            "Transforming image cover {}x{} to {}x{}",
            image.width(),
            image.height(),
            self.width,
            self.height
        );
        let crop = cover_crop(image.width(), image.height(), self.width, self.height);
        image
            .crop_imm(crop.left, crop.top, crop.width, crop.height)
            .resize_exact(self.width, self.height, FilterType::Triangle)
    }

    fn contain(&self, image: &DynamicImage) -> DynamicImage {
        info!(
            "Transforming image contain {}x{} to {}x{}",
            image.width(),
            image.height(),
            self.width,
            self.height
        );
        let (width, height) = contain_size(image.width(), image.height(), self.width, self.height);
        image.resize_exact(width, height, FilterType::Lanczos3)
    }

    fn output_format(&self) -> AmbryResult<OutputFormat> {
        OutputFormat::from_str(&self.format).map_err(|_| {
            TransformError::new(TransformErrorKind::Encode(format!(
                "unsupported output format '{}'",
                self.format
            )))
            .into()
        })
    }

    fn encode(&self, image: &DynamicImage) -> AmbryResult<Vec<u8>> {
        let format = self.output_format()?;
        let mut buffer = Vec::new();

        let result = match format {
            OutputFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8())
                .write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, self.quality)),
            OutputFormat::Png => image.write_with_encoder(PngEncoder::new(&mut buffer)),
            OutputFormat::Webp => {
                let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
                let encoded = webp::Encoder::from_image(&rgba)
                    .map_err(|e| {
                        TransformError::new(TransformErrorKind::Encode(format!("{}: {}", format, e)))
                    })?
                    .encode(f32::from(self.quality));
                buffer.extend_from_slice(&encoded);
                Ok(())
            }
        };

        result.map_err(|e| {
            TransformError::new(TransformErrorKind::Encode(format!("{}: {}", format, e)))
        })?;
        Ok(buffer)
    }
}

fn dimension(params: &Params, key: &str) -> AmbryResult<u32> {
    let value = params.required_int(key)?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| {
            ConfigError::new(format!("Parameter '{}' must be a positive integer, got {}", key, value))
                .into()
        })
}

impl Transform for ResizeTransform {
    fn name(&self) -> &str {
        &self.name
    }

    fn for_mime_types(&self) -> &[&'static str] {
        MIME_TYPES
    }

    fn config_schema(&self) -> ConfigSchema {
        Self::schema()
    }

    #[instrument(skip(self, input, output), fields(name = %self.name, fit = %self.fit))]
    fn apply(&self, input: &mut dyn Read, output: &mut dyn Write) -> AmbryResult<()> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes).map_err(|e| {
            TransformError::new(TransformErrorKind::Read(e.to_string()))
        })?;

        let image = image::load_from_memory(&bytes).map_err(|e| {
            TransformError::new(TransformErrorKind::Decode(e.to_string()))
        })?;

        let resized = self.resize_image(&image);
        let encoded = self.encode(&resized)?;

        output
            .write_all(&encoded)
            .and_then(|_| output.flush())
            .map_err(|e| TransformError::new(TransformErrorKind::Write(e.to_string())))?;

        debug!(
            width = resized.width(),
            height = resized.height(),
            bytes = encoded.len(),
            "Resized image"
        );
        Ok(())
    }

    fn output_mime_type(&self, input_mime: &str) -> String {
        self.output_format()
            .map(|f| f.mime_type().to_string())
            .unwrap_or_else(|_| input_mime.to_string())
    }
}
