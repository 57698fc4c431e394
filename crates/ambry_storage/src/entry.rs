//! File entry metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Metadata for one stored object.
///
/// `name` is the forward-slash path relative to the bucket root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct FileEntry {
    /// Path relative to the bucket root
    name: String,
    /// Size in bytes
    size: u64,
    /// Time of last write
    modified: DateTime<Utc>,
}

impl FileEntry {
    /// Create a new file entry.
    pub fn new(name: impl Into<String>, size: u64, modified: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            size,
            modified,
        }
    }

    /// Build an entry from filesystem metadata.
    ///
    /// Falls back to the Unix epoch, with a warning, when the platform
    /// cannot report a modification time.
    pub fn from_metadata(name: impl Into<String>, metadata: &std::fs::Metadata) -> Self {
        let name = name.into();
        let modified = modified_or_epoch(&name, metadata.modified());
        Self::new(name, metadata.len(), modified)
    }
}

fn modified_or_epoch(name: &str, modified: std::io::Result<SystemTime>) -> DateTime<Utc> {
    match modified {
        Ok(time) => DateTime::<Utc>::from(time),
        Err(e) => {
            tracing::warn!(file = name, error = %e, "Modification time unavailable, using epoch");
            DateTime::<Utc>::UNIX_EPOCH
        }
    }
}
