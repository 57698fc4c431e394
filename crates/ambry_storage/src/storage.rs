//! Storage trait definition.

use crate::{FileEntry, ObjectWriter};
use ambry_error::{AmbryResult, StorageError, StorageErrorKind};
use std::io::{Read, Write};

/// Page size used by callers that do not pick one.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Trait for pluggable bucket/file storage backends.
///
/// All operations block the calling thread. Implementations hold no
/// per-call state, so one instance may serve concurrent callers; concurrent
/// writers to the same path race with last-write-wins semantics.
pub trait Storage: Send + Sync {
    /// Create a bucket.
    ///
    /// Idempotent: creating a bucket that already exists succeeds. Backends
    /// that choose strict creation raise `BucketAlreadyExists` instead and
    /// must document it.
    fn create_bucket(&self, name: &str) -> AmbryResult<()>;

    /// Delete a bucket and every file in it.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchBucket` if the bucket does not exist.
    fn delete_bucket(&self, name: &str) -> AmbryResult<()>;

    /// List bucket names.
    ///
    /// Skips `start` names and returns at most `limit`. The order is
    /// backend-defined but stable while the set of buckets is unchanged.
    fn list_buckets(&self, start: usize, limit: usize) -> AmbryResult<Vec<String>>;

    /// List files in a bucket as a flattened view of its nested contents.
    ///
    /// Files directly in a directory come before anything inside its
    /// subdirectories. Pagination is applied to the flattened sequence,
    /// and backends must stop producing entries once `start + limit` have
    /// been reached.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchBucket` if the bucket does not exist.
    fn list_files(&self, bucket: &str, start: usize, limit: usize) -> AmbryResult<Vec<FileEntry>>;

    /// Open a file for reading.
    ///
    /// The handle releases its descriptor when dropped.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchFile` if the file does not exist.
    fn open_read(&self, bucket: &str, file: &str) -> AmbryResult<Box<dyn Read + Send>>;

    /// Open a file for writing, creating it or fully replacing it.
    ///
    /// Content becomes visible only when [`ObjectWriter::finish`] succeeds.
    /// Dropping the writer without finishing discards everything written.
    fn open_write(&self, bucket: &str, file: &str) -> AmbryResult<Box<dyn ObjectWriter>>;

    /// Delete one file.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchFile` if the file does not exist.
    fn delete_file(&self, bucket: &str, file: &str) -> AmbryResult<()>;

    /// Get file metadata without reading content.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchFile` if the file does not exist.
    fn stat(&self, bucket: &str, file: &str) -> AmbryResult<FileEntry>;

    /// Read a whole file into memory.
    fn read_bytes(&self, bucket: &str, file: &str) -> AmbryResult<Vec<u8>> {
        let mut reader = self.open_read(bucket, file)?;
        let mut data = Vec::new();
        reader.read_to_end(&mut data).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!("{}/{}: {}", bucket, file, e)))
        })?;
        Ok(data)
    }

    /// Write a whole file, replacing any previous content.
    fn write_bytes(&self, bucket: &str, file: &str, data: &[u8]) -> AmbryResult<FileEntry> {
        let mut writer = self.open_write(bucket, file)?;
        writer.write_all(data).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!("{}/{}: {}", bucket, file, e)))
        })?;
        writer.finish()
    }
}
