//! Top-level error wrapper types.

use crate::{ConfigError, StorageError, StorageErrorKind, TransformError};

/// Every error family raised by Ambry crates.
///
/// # Examples
///
/// ```
/// use ambry_error::{AmbryError, ConfigError};
///
/// let err: AmbryError = ConfigError::new("Unknown backend type 'ftp'").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AmbryErrorKind {
    /// Storage backend error
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Content transform error
    #[from(TransformError)]
    Transform(TransformError),
}

/// Ambry error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Ambry Error: {}", _0)]
pub struct AmbryError(Box<AmbryErrorKind>);

impl AmbryError {
    /// Create a new error from a kind.
    pub fn new(kind: AmbryErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AmbryErrorKind {
        &self.0
    }

    /// Get the storage error kind, if this is a storage error.
    pub fn storage_kind(&self) -> Option<&StorageErrorKind> {
        match self.kind() {
            AmbryErrorKind::Storage(e) => Some(&e.kind),
            _ => None,
        }
    }

    /// Whether a required bucket was absent.
    pub fn is_no_such_bucket(&self) -> bool {
        matches!(self.storage_kind(), Some(StorageErrorKind::NoSuchBucket(_)))
    }

    /// Whether a required file was absent.
    pub fn is_no_such_file(&self) -> bool {
        matches!(self.storage_kind(), Some(StorageErrorKind::NoSuchFile(_)))
    }

    /// Whether this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self.kind(), AmbryErrorKind::Config(_))
    }
}

// Generic From implementation for any type that converts to AmbryErrorKind
impl<T> From<T> for AmbryError
where
    T: Into<AmbryErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Ambry operations.
///
/// # Examples
///
/// ```
/// use ambry_error::{AmbryResult, ConfigError};
///
/// fn parse_width() -> AmbryResult<u32> {
///     Err(ConfigError::new("width must be an integer"))?
/// }
/// assert!(parse_width().unwrap_err().is_config());
/// ```
pub type AmbryResult<T> = std::result::Result<T, AmbryError>;
