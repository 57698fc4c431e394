//! Filesystem-based storage implementation.
//!
//! Each bucket is a top-level directory under the configured root and each
//! file is a relative path beneath its bucket directory.

use crate::path::{validate_bucket_name, validate_file_path};
use crate::writer::{TempFileWriter, UPLOAD_PREFIX};
use crate::{FileEntry, FileWalker, ObjectWriter, Storage};
use ambry_error::{AmbryResult, StorageError, StorageErrorKind};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

/// Filesystem storage backend.
///
/// # Example Structure
///
/// ```text
/// /var/ambry/data/          (root)
/// ├── photos/               (bucket)
/// │   ├── cover.png
/// │   └── 2024/
/// │       └── beach.jpg     (file "2024/beach.jpg")
/// └── documents/            (bucket)
///     └── report.pdf
/// ```
///
/// No metadata is cached: every call re-reads the filesystem. Existence
/// checks are best-effort, since an external process may delete a file
/// between the check and the operation.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    root: PathBuf,
}

impl FileSystemStorage {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the root directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(root))]
    pub fn new(root: impl Into<PathBuf>) -> AmbryResult<Self> {
        let root = root.into();

        std::fs::create_dir_all(&root).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                root.display(),
                e
            )))
        })?;

        tracing::info!(path = %root.display(), "Created filesystem storage");
        Ok(Self { root })
    }

    /// Root directory holding the bucket directories.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn bucket_path(&self, bucket: &str) -> AmbryResult<PathBuf> {
        validate_bucket_name(bucket)?;
        Ok(self.root.join(bucket))
    }

    /// Resolve the bucket directory, failing if it does not exist.
    fn existing_bucket_path(&self, bucket: &str) -> AmbryResult<PathBuf> {
        let path = self.bucket_path(bucket)?;
        if !path.is_dir() {
            return Err(
                StorageError::new(StorageErrorKind::NoSuchBucket(bucket.to_string())).into(),
            );
        }
        Ok(path)
    }

    fn file_path(&self, bucket: &str, file: &str) -> AmbryResult<PathBuf> {
        let bucket_path = self.bucket_path(bucket)?;
        validate_file_path(file)?;
        Ok(file
            .split('/')
            .fold(bucket_path, |path, part| path.join(part)))
    }

    /// Resolve a file path, failing if no regular file exists there.
    fn existing_file_path(&self, bucket: &str, file: &str) -> AmbryResult<PathBuf> {
        let path = self.file_path(bucket, file)?;
        if !path.is_file() {
            return Err(StorageError::new(StorageErrorKind::NoSuchFile(format!(
                "{}/{}",
                bucket, file
            )))
            .into());
        }
        Ok(path)
    }

    /// Walk every file in a bucket lazily, files before subdirectories.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchBucket` before any traversal if the bucket is absent.
    pub fn walk_files(&self, bucket: &str) -> AmbryResult<FileWalker> {
        let path = self.existing_bucket_path(bucket)?;
        Ok(FileWalker::new(path))
    }
}

impl Storage for FileSystemStorage {
    #[tracing::instrument(skip(self))]
    fn create_bucket(&self, name: &str) -> AmbryResult<()> {
        let path = self.bucket_path(name)?;
        std::fs::create_dir_all(&path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        tracing::info!(bucket = name, "Created bucket");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn delete_bucket(&self, name: &str) -> AmbryResult<()> {
        let path = self.existing_bucket_path(name)?;
        std::fs::remove_dir_all(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NoSuchBucket(name.to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileDelete(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;
        tracing::info!(bucket = name, "Deleted bucket");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn list_buckets(&self, start: usize, limit: usize) -> AmbryResult<Vec<String>> {
        let read_err = |e: std::io::Error| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                self.root.display(),
                e
            )))
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            if entry.file_type().map_err(read_err)?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        let page: Vec<String> = names.into_iter().skip(start).take(limit).collect();
        tracing::debug!(count = page.len(), "Listed buckets");
        Ok(page)
    }

    #[tracing::instrument(skip(self))]
    fn list_files(&self, bucket: &str, start: usize, limit: usize) -> AmbryResult<Vec<FileEntry>> {
        let mut walker = self.walk_files(bucket)?;
        // Errors inside the skipped range still fail the call.
        walker
            .by_ref()
            .take(start)
            .try_for_each(|entry| entry.map(drop))?;
        let page = walker.take(limit).collect::<AmbryResult<Vec<_>>>()?;
        tracing::debug!(count = page.len(), "Listed files");
        Ok(page)
    }

    #[tracing::instrument(skip(self))]
    fn open_read(&self, bucket: &str, file: &str) -> AmbryResult<Box<dyn Read + Send>> {
        let path = self.existing_file_path(bucket, file)?;
        let handle = File::open(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NoSuchFile(format!("{}/{}", bucket, file)))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;
        tracing::debug!("Opened file for reading");
        Ok(Box::new(BufReader::new(handle)))
    }

    #[tracing::instrument(skip(self))]
    fn open_write(&self, bucket: &str, file: &str) -> AmbryResult<Box<dyn ObjectWriter>> {
        self.existing_bucket_path(bucket)?;
        let path = self.file_path(bucket, file)?;

        if path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with(UPLOAD_PREFIX))
        {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "file name may not start with '{}'",
                UPLOAD_PREFIX
            )))
            .into());
        }

        if path.is_dir() {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "{}/{} is a directory",
                bucket, file
            )))
            .into());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        tracing::debug!("Opened file for writing");
        Ok(Box::new(TempFileWriter::create(path, file)?))
    }

    #[tracing::instrument(skip(self))]
    fn delete_file(&self, bucket: &str, file: &str) -> AmbryResult<()> {
        let path = self.existing_file_path(bucket, file)?;
        std::fs::remove_file(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NoSuchFile(format!("{}/{}", bucket, file)))
            } else {
                StorageError::new(StorageErrorKind::FileDelete(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;
        tracing::info!(bucket, file, "Deleted file");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn stat(&self, bucket: &str, file: &str) -> AmbryResult<FileEntry> {
        let path = self.existing_file_path(bucket, file)?;
        let metadata = std::fs::metadata(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NoSuchFile(format!("{}/{}", bucket, file)))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;
        Ok(FileEntry::from_metadata(file, &metadata))
    }
}
