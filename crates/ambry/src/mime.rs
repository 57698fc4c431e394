//! Content-type guessing from file names.

/// Content type used when the extension is unknown.
const OCTET_STREAM: &str = "application/octet-stream";

/// Guess a content type from a file path's extension.
///
/// Unknown or missing extensions map to `application/octet-stream`.
///
/// # Examples
///
/// ```
/// use ambry::guess_mime_type;
///
/// assert_eq!(guess_mime_type("photos/2024/cat.JPG"), "image/jpeg");
/// assert_eq!(guess_mime_type("README"), "application/octet-stream");
/// ```
pub fn guess_mime_type(path: &str) -> &'static str {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let Some((_, extension)) = file_name.rsplit_once('.') else {
        return OCTET_STREAM;
    };

    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "js" => "text/javascript",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type("a.png"), "image/png");
        assert_eq!(guess_mime_type("dir.d/file"), OCTET_STREAM);
        assert_eq!(guess_mime_type("archive.tar.zip"), "application/zip");
        assert_eq!(guess_mime_type("notes.TXT"), "text/plain");
    }
}
