//! Free-form parameter maps with typed accessors.

use ambry_error::{AmbryResult, ConfigError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Backend- or transform-specific parameters.
///
/// Values keep the type they had in the configuration source. The typed
/// accessors are lenient about representation: integers may be written
/// as numbers or as numeric strings.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    derive_more::Deref,
    derive_more::DerefMut,
    derive_more::From,
)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Get an optional string parameter.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the value is present but not a string.
    pub fn str_param(&self, key: &str) -> AmbryResult<Option<&str>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(ConfigError::new(format!(
                "Parameter '{}' must be a string, got {}",
                key, other
            ))
            .into()),
        }
    }

    /// Get a required string parameter.
    pub fn required_str(&self, key: &str) -> AmbryResult<&str> {
        self.str_param(key)?
            .ok_or_else(|| ConfigError::new(format!("Missing required parameter '{}'", key)).into())
    }

    /// Get an optional integer parameter.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the value is present but not an integer.
    pub fn int_param(&self, key: &str) -> AmbryResult<Option<i64>> {
        let parsed = match self.0.get(key) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            Some(_) => None,
        };
        parsed.map(Some).ok_or_else(|| {
            ConfigError::new(format!(
                "Parameter '{}' must be an integer, got {}",
                key, self.0[key]
            ))
            .into()
        })
    }

    /// Get a required integer parameter.
    pub fn required_int(&self, key: &str) -> AmbryResult<i64> {
        self.int_param(key)?
            .ok_or_else(|| ConfigError::new(format!("Missing required parameter '{}'", key)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_int_param_accepts_numeric_strings() {
        let params = Params::new().with("width", 100).with("height", "50");
        assert_eq!(params.required_int("width").unwrap(), 100);
        assert_eq!(params.required_int("height").unwrap(), 50);
    }

    #[test]
    fn test_int_param_rejects_garbage() {
        let params = Params::new().with("width", "wide").with("height", json!(1.5));
        assert!(params.int_param("width").unwrap_err().is_config());
        assert!(params.int_param("height").unwrap_err().is_config());
    }

    #[test]
    fn test_missing_required() {
        let params = Params::new();
        assert!(params.required_int("width").unwrap_err().is_config());
        assert!(params.required_str("path").unwrap_err().is_config());
        assert_eq!(params.int_param("quality").unwrap(), None);
    }

    #[test]
    fn test_str_param_type_mismatch() {
        let params = Params::new().with("path", 3);
        assert!(params.str_param("path").is_err());
    }
}
