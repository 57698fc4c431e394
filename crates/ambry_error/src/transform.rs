//! Transform error types.

/// Specific error conditions for content transforms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TransformErrorKind {
    /// Input content could not be decoded
    #[display("Failed to decode input: {}", _0)]
    Decode(String),
    /// Output could not be encoded in the requested format
    #[display("Failed to encode output: {}", _0)]
    Encode(String),
    /// Reading the input stream failed
    #[display("Failed to read input stream: {}", _0)]
    Read(String),
    /// Writing the output stream failed
    #[display("Failed to write output stream: {}", _0)]
    Write(String),
    /// The transform does not handle this content type
    #[display("Unsupported content type: {}", _0)]
    UnsupportedMimeType(String),
}

/// Transform error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transform Error: {} at line {} in {}", kind, line, file)]
pub struct TransformError {
    /// The kind of error that occurred
    pub kind: TransformErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TransformError {
    /// Create a new transform error with caller location tracking.
    #[track_caller]
    pub fn new(kind: TransformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TransformErrorKind {
        &self.kind
    }
}
