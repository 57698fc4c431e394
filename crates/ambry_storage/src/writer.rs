//! Scoped write handles.

use crate::FileEntry;
use ambry_error::{AmbryResult, StorageError, StorageErrorKind};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Name prefix of in-progress uploads. Listings skip these files.
pub(crate) const UPLOAD_PREFIX: &str = ".ambry-upload-";

/// A writable byte stream for one stored object.
///
/// Bytes written are invisible to readers until [`finish`](Self::finish)
/// succeeds, at which point they replace the previous content in full.
/// Dropping the writer without finishing releases the underlying
/// descriptor and discards the partial upload.
pub trait ObjectWriter: Write + Send {
    /// Commit the written bytes and return the new file metadata.
    fn finish(self: Box<Self>) -> AmbryResult<FileEntry>;
}

/// Writes into a hidden sibling file and renames it over the target.
pub(crate) struct TempFileWriter {
    file: Option<BufWriter<File>>,
    temp_path: PathBuf,
    target: PathBuf,
    name: String,
}

impl TempFileWriter {
    /// Create the temporary file next to `target`.
    pub(crate) fn create(target: PathBuf, name: impl Into<String>) -> AmbryResult<Self> {
        let parent = target.parent().unwrap_or_else(|| Path::new("."));
        let temp_path = parent.join(format!("{}{}.tmp", UPLOAD_PREFIX, uuid::Uuid::new_v4()));

        let file = File::create(&temp_path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        Ok(Self {
            file: Some(BufWriter::new(file)),
            temp_path,
            target,
            name: name.into(),
        })
    }

    fn commit(&mut self) -> AmbryResult<FileEntry> {
        let Some(writer) = self.file.take() else {
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: writer already closed",
                self.name
            )))
            .into());
        };

        let file = writer.into_inner().map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                self.temp_path.display(),
                e.error()
            )))
        })?;
        file.sync_all().map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "sync {}: {}",
                self.temp_path.display(),
                e
            )))
        })?;
        drop(file);

        std::fs::rename(&self.temp_path, &self.target).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                self.temp_path.display(),
                self.target.display(),
                e
            )))
        })?;

        let metadata = std::fs::metadata(&self.target).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                self.target.display(),
                e
            )))
        })?;

        Ok(FileEntry::from_metadata(self.name.clone(), &metadata))
    }
}

impl Write for TempFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.file.as_mut() {
            Some(file) => file.write(buf),
            None => Err(std::io::Error::other("writer already closed")),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl ObjectWriter for TempFileWriter {
    #[tracing::instrument(skip(self), fields(file = %self.name))]
    fn finish(mut self: Box<Self>) -> AmbryResult<FileEntry> {
        let entry = self.commit()?;
        tracing::info!(file = %self.name, size = entry.size(), "Stored file");
        Ok(entry)
    }
}

impl Drop for TempFileWriter {
    fn drop(&mut self) {
        // After a successful rename the temp path no longer exists.
        self.file.take();
        if self.temp_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.temp_path) {
                tracing::warn!(path = %self.temp_path.display(), error = %e, "Failed to discard partial upload");
            } else {
                tracing::debug!(file = %self.name, "Discarded unfinished upload");
            }
        }
    }
}
