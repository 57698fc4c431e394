//! Lazy files-first traversal of a bucket directory.

use crate::FileEntry;
use crate::writer::UPLOAD_PREFIX;
use ambry_error::{AmbryResult, StorageError, StorageErrorKind};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, FilterEntry, WalkDir};

type Entries = FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>;

/// Depth-first iterator over every file in a bucket.
///
/// At each directory level all plain files are yielded before descending
/// into any subdirectory, and subdirectories are fully walked one at a time.
/// Entries within a directory are ordered by name. A directory is only read
/// when the walk reaches it, so dropping the iterator early leaves the rest
/// of the tree untouched.
///
/// Symbolic links are followed: a link to a directory is walked like the
/// directory itself and a link to a file is listed as that file.
///
/// Paths are reported relative to the bucket root with `/` separators.
pub struct FileWalker {
    root: PathBuf,
    entries: Entries,
    directories_read: usize,
}

impl FileWalker {
    /// Start a walk rooted at `root`. Nothing is read until the first item
    /// is requested.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let entries = WalkDir::new(&root)
            .follow_links(true)
            .sort_by(files_first)
            .into_iter()
            .filter_entry(is_visible as fn(&DirEntry) -> bool);
        Self {
            root,
            entries,
            directories_read: 0,
        }
    }

    /// Number of directories listed so far, the bucket root included.
    pub fn directories_read(&self) -> usize {
        self.directories_read
    }

    fn relative_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    is_dir(a)
        .cmp(&is_dir(b))
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_visible(entry: &DirEntry) -> bool {
    entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with(UPLOAD_PREFIX)
}

/// True when nothing is left at the path, not even a dangling link.
fn vanished(err: &walkdir::Error) -> bool {
    err.io_error()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
        && err
            .path()
            .is_some_and(|p| std::fs::symlink_metadata(p).is_err())
}

impl Iterator for FileWalker {
    type Item = AmbryResult<FileEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) if err.loop_ancestor().is_some() => {
                    tracing::warn!(error = %err, "Symlink loop during listing, skipping");
                    continue;
                }
                Err(err) if vanished(&err) => {
                    tracing::warn!(error = %err, "Entry vanished during listing, skipping");
                    continue;
                }
                Err(err) => {
                    return Some(Err(
                        StorageError::new(StorageErrorKind::FileRead(err.to_string())).into(),
                    ));
                }
            };

            if entry.file_type().is_dir() {
                self.directories_read += 1;
                tracing::trace!(dir = %entry.path().display(), "Read directory");
                continue;
            }

            let relative = self.relative_name(entry.path());
            if !entry.file_type().is_file() {
                tracing::debug!(file = %relative, "Skipping special file");
                continue;
            }

            match entry.metadata() {
                Ok(metadata) => return Some(Ok(FileEntry::from_metadata(relative, &metadata))),
                Err(err) if vanished(&err) => {
                    tracing::warn!(file = %relative, "File vanished during listing, skipping");
                }
                Err(err) => {
                    return Some(Err(
                        StorageError::new(StorageErrorKind::FileRead(err.to_string())).into(),
                    ));
                }
            }
        }
    }
}
