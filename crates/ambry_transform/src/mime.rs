//! Content-type pattern matching.

/// Check whether a content type matches a pattern.
///
/// Supported patterns are exact types (`image/png`), wildcard subtypes
/// (`image/*`) and match-anything (`*` or `*/*`). Comparison ignores ASCII
/// case and any parameters after `;`.
pub fn mime_matches(pattern: &str, mime: &str) -> bool {
    let essence = |s: &str| s.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    let pattern = essence(pattern);
    let mime = essence(mime);

    if pattern == "*" || pattern == "*/*" {
        return true;
    }

    match pattern.strip_suffix("/*") {
        Some(top_level) => mime
            .split_once('/')
            .is_some_and(|(kind, _)| kind == top_level),
        None => pattern == mime,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_subtype() {
        assert!(mime_matches("image/*", "image/png"));
        assert!(mime_matches("image/*", "IMAGE/JPEG"));
        assert!(!mime_matches("image/*", "text/plain"));
        assert!(!mime_matches("image/*", "imagery/png"));
        assert!(!mime_matches("image/*", "image"));
    }

    #[test]
    fn test_exact_and_any() {
        assert!(mime_matches("text/plain", "text/plain; charset=utf-8"));
        assert!(!mime_matches("text/plain", "text/html"));
        assert!(mime_matches("*/*", "application/octet-stream"));
        assert!(mime_matches("*", "video/mp4"));
    }
}
