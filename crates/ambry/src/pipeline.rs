//! Reading stored objects through a transform.

use crate::guess_mime_type;
use ambry_error::{AmbryResult, TransformError, TransformErrorKind};
use ambry_storage::Storage;
use ambry_transform::Transform;
use std::io::Write;

/// Stream a stored file through `transform` into `output`.
///
/// The content type is guessed from the file name and must be accepted by
/// the transform. The read handle is released on every exit path.
///
/// Returns the content type of the transformed output.
///
/// # Errors
///
/// Returns `NoSuchBucket`/`NoSuchFile` from the backend,
/// `UnsupportedMimeType` when the transform does not handle the file, and
/// any decode or encode error raised by the transform.
#[tracing::instrument(skip(storage, transform, output), fields(transform = transform.name()))]
pub fn read_transformed(
    storage: &dyn Storage,
    bucket: &str,
    file: &str,
    transform: &dyn Transform,
    output: &mut dyn Write,
) -> AmbryResult<String> {
    let mime = guess_mime_type(file);
    if !transform.accepts(mime) {
        return Err(TransformError::new(TransformErrorKind::UnsupportedMimeType(format!(
            "{} cannot process {} ({})",
            transform.name(),
            file,
            mime
        )))
        .into());
    }

    let mut reader = storage.open_read(bucket, file)?;
    transform.apply(&mut reader, output)?;
    Ok(transform.output_mime_type(mime))
}
