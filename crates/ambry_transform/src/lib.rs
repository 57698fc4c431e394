//! Content transforms for Ambry.
//!
//! A [`Transform`] consumes a readable byte stream and writes a new byte
//! stream, for example a resized image. Each transform declares the content
//! types it accepts and a self-describing [`ConfigSchema`] that can be
//! queried before any instance exists.
//!
//! # Example
//!
//! ```rust
//! use ambry_config::Params;
//! use ambry_transform::{ResizeTransform, Transform};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = Params::new().with("width", 100).with("height", 100);
//! let resize = ResizeTransform::from_params("thumb", &params)?;
//! assert!(resize.accepts("image/png"));
//! assert!(!resize.accepts("text/plain"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod geometry;
mod mime;
mod resize;
mod schema;
mod transform;

pub use ambry_error::{TransformError, TransformErrorKind};
pub use geometry::{CropRect, contain_size, cover_crop};
pub use mime::mime_matches;
pub use resize::{FitStrategy, OutputFormat, ResizeTransform};
pub use schema::{ConfigSchema, ParameterKind, ParameterSpec};
pub use transform::Transform;
