//! Declarative configuration for Ambry backends and transforms.
//!
//! Configuration is read from TOML through the `config` crate. Each storage
//! backend and each transform is a record with a `name`, a `type` and any
//! number of type-specific parameters:
//!
//! ```toml
//! [[storage]]
//! name = "default"
//! type = "filesystem"
//! path = "./data"
//!
//! [[transforms]]
//! name = "thumb"
//! type = "resize"
//! width = 200
//! height = 200
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod params;
mod settings;

pub use params::Params;
pub use settings::{AmbryConfig, BackendConfig, TransformConfig};
