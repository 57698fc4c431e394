//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Bucket does not exist
    #[display("No such bucket: {}", _0)]
    NoSuchBucket(String),
    /// File does not exist in the bucket
    #[display("No such file: {}", _0)]
    NoSuchFile(String),
    /// Bucket already exists (only for backends with strict bucket creation)
    #[display("Bucket already exists: {}", _0)]
    BucketAlreadyExists(String),
    /// Bucket name or file path is not acceptable
    #[display("Invalid storage path: {}", _0)]
    InvalidPath(String),
    /// Failed to create a directory
    #[display("Failed to create directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to read a file or directory
    #[display("Failed to read: {}", _0)]
    FileRead(String),
    /// Failed to write a file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to remove a file or directory
    #[display("Failed to delete: {}", _0)]
    FileDelete(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use ambry_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NoSuchFile("photos/cat.png".to_string()));
/// assert!(format!("{}", err).contains("No such file"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorageErrorKind {
        &self.kind
    }
}
