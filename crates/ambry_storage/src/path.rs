//! Bucket name and file path validation.

use ambry_error::{AmbryResult, StorageError, StorageErrorKind};

/// Check that a bucket name is a single, ordinary path component.
///
/// # Errors
///
/// Returns `InvalidPath` for empty names, `.`/`..`, or names containing a
/// path separator.
pub fn validate_bucket_name(name: &str) -> AmbryResult<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
            "bucket name '{}'",
            name
        )))
        .into());
    }
    Ok(())
}

/// Check that a file path is relative and stays inside its bucket.
///
/// Paths are forward-slash delimited. Empty components (`a//b`), `.` and
/// `..` are rejected, as are leading slashes and backslashes.
///
/// # Errors
///
/// Returns `InvalidPath` when the path is not acceptable.
pub fn validate_file_path(path: &str) -> AmbryResult<()> {
    let invalid = path.is_empty()
        || path.contains('\\')
        || path
            .split('/')
            .any(|part| part.is_empty() || part == "." || part == "..");
    if invalid {
        return Err(
            StorageError::new(StorageErrorKind::InvalidPath(format!("file path '{}'", path)))
                .into(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_names() {
        assert!(validate_bucket_name("photos").is_ok());
        assert!(validate_bucket_name("my.bucket-1").is_ok());
        assert!(validate_bucket_name("").is_err());
        assert!(validate_bucket_name("..").is_err());
        assert!(validate_bucket_name("a/b").is_err());
    }

    #[test]
    fn test_file_paths() {
        assert!(validate_file_path("a.txt").is_ok());
        assert!(validate_file_path("sub/dir/b.txt").is_ok());
        assert!(validate_file_path("/etc/passwd").is_err());
        assert!(validate_file_path("../escape").is_err());
        assert!(validate_file_path("a/./b").is_err());
        assert!(validate_file_path("a//b").is_err());
        assert!(validate_file_path("dir/").is_err());
        assert!(validate_file_path("").is_err());
    }
}
