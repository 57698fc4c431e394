//! Bucket/file object storage for Ambry.
//!
//! This crate defines the [`Storage`] contract every backend implements and
//! ships the [`FileSystemStorage`] backend, which maps each bucket to a
//! top-level directory and each file to a relative path beneath it.
//!
//! # Features
//!
//! - **Capability trait**: callers hold `Arc<dyn Storage>` and never a concrete backend
//! - **Lazy listing**: files are produced by a files-first depth-first walk that stops
//!   as soon as the requested page is filled
//! - **Scoped streams**: read handles close on drop; writes land in a temporary file
//!   that only replaces the target on [`ObjectWriter::finish`]
//!
//! # Example
//!
//! ```rust
//! use ambry_storage::{FileSystemStorage, Storage};
//! use std::io::Write;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let root = std::env::temp_dir().join("ambry-doc-example");
//! let storage = FileSystemStorage::new(&root)?;
//! storage.create_bucket("photos")?;
//!
//! let mut writer = storage.open_write("photos", "2024/cat.txt")?;
//! writer.write_all(b"meow")?;
//! let entry = writer.finish()?;
//! assert_eq!(*entry.size(), 4);
//!
//! assert_eq!(storage.read_bytes("photos", "2024/cat.txt")?, b"meow");
//! # storage.delete_bucket("photos")?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod entry;
mod filesystem;
mod path;
mod storage;
mod walker;
mod writer;

pub use ambry_error::{StorageError, StorageErrorKind};
pub use entry::FileEntry;
pub use filesystem::FileSystemStorage;
pub use path::{validate_bucket_name, validate_file_path};
pub use storage::{DEFAULT_LIST_LIMIT, Storage};
pub use walker::FileWalker;
pub use writer::ObjectWriter;
