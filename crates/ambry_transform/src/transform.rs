//! Transform trait definition.

use crate::{ConfigSchema, mime_matches};
use ambry_error::AmbryResult;
use std::io::{Read, Write};

/// A configured processor turning one byte stream into another.
///
/// Implementations are constructed from configuration and are immutable
/// afterwards, so one instance may serve concurrent callers.
pub trait Transform: Send + Sync {
    /// Configured name of this transform instance.
    fn name(&self) -> &str;

    /// Content-type patterns this transform can process.
    ///
    /// Patterns may end in `/*` to match every subtype, e.g. `image/*`.
    fn for_mime_types(&self) -> &[&'static str];

    /// Parameters this transform accepts.
    fn config_schema(&self) -> ConfigSchema;

    /// Read `input` to the end and write the transformed content to `output`.
    fn apply(&self, input: &mut dyn Read, output: &mut dyn Write) -> AmbryResult<()>;

    /// Content type of the output produced for an input of `input_mime`.
    fn output_mime_type(&self, input_mime: &str) -> String {
        input_mime.to_string()
    }

    /// Whether this transform can process content of the given type.
    fn accepts(&self, mime: &str) -> bool {
        self.for_mime_types()
            .iter()
            .any(|pattern| mime_matches(pattern, mime))
    }
}
