//! Error types for the Ambry object storage library.
//!
//! Every error family follows the same `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use ambry_error::{AmbryResult, StorageError, StorageErrorKind};
//!
//! fn open_bucket(name: &str) -> AmbryResult<()> {
//!     Err(StorageError::new(StorageErrorKind::NoSuchBucket(name.to_string())))?
//! }
//!
//! let err = open_bucket("photos").unwrap_err();
//! assert!(err.is_no_such_bucket());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod storage;
mod transform;

pub use config::ConfigError;
pub use error::{AmbryError, AmbryErrorKind, AmbryResult};
pub use storage::{StorageError, StorageErrorKind};
pub use transform::{TransformError, TransformErrorKind};
