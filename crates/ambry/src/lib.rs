//! Ambry - object storage with pluggable backends and on-read transforms.
//!
//! Ambry exposes a uniform bucket/file model over interchangeable storage
//! backends and can pipe stored content through configured transforms
//! (such as image resizing) while reading it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ambry::{AmbryConfig, BackendRegistry, Storage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AmbryConfig::from_file("ambry.toml")?;
//! let backends = BackendRegistry::from_config(&config)?;
//!
//! let storage = backends.resolve_backend("photos")?;
//! storage.create_bucket("photos")?;
//! storage.write_bytes("photos", "cat.png", b"...")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `ambry_error` - Error types
//! - `ambry_config` - Configuration records and loading
//! - `ambry_storage` - Storage trait and filesystem backend
//! - `ambry_transform` - Transform trait and the resize transform
//!
//! This crate adds the backend and transform registries and re-exports
//! everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod mime;
mod pipeline;
mod registry;
mod transforms;

pub use mime::guess_mime_type;
pub use pipeline::read_transformed;
pub use registry::{BackendConstructor, BackendRegistry, StorageFactory};
pub use transforms::{TransformConstructor, TransformFactory, TransformRegistry};

pub use ambry_config::{AmbryConfig, BackendConfig, Params, TransformConfig};
pub use ambry_error::{
    AmbryError, AmbryErrorKind, AmbryResult, ConfigError, StorageError, StorageErrorKind,
    TransformError, TransformErrorKind,
};
pub use ambry_storage::{
    DEFAULT_LIST_LIMIT, FileEntry, FileSystemStorage, FileWalker, ObjectWriter, Storage,
};
pub use ambry_transform::{
    ConfigSchema, FitStrategy, OutputFormat, ParameterKind, ParameterSpec, ResizeTransform,
    Transform, mime_matches,
};
