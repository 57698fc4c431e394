//! Self-describing transform configuration schemas.

use ambry_config::Params;
use ambry_error::{AmbryResult, ConfigError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Value type of one configuration parameter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParameterKind {
    /// Whole number, written as a number or numeric string
    Integer,
    /// Free-form text
    String,
    /// One of a fixed list of options
    Select,
}

/// Description of one accepted configuration parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ParameterSpec {
    /// Value type
    #[serde(rename = "type")]
    kind: ParameterKind,
    /// Whether construction fails without it
    required: bool,
    /// Value used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    /// Human-readable description
    description: String,
    /// Allowed values for `select` parameters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<String>,
}

impl ParameterSpec {
    /// A required integer parameter.
    pub fn required_integer(description: impl Into<String>) -> Self {
        Self {
            kind: ParameterKind::Integer,
            required: true,
            default: None,
            description: description.into(),
            options: Vec::new(),
        }
    }

    /// An optional integer parameter with a default.
    pub fn integer(description: impl Into<String>, default: i64) -> Self {
        Self {
            kind: ParameterKind::Integer,
            required: false,
            default: Some(Value::from(default)),
            description: description.into(),
            options: Vec::new(),
        }
    }

    /// An optional select parameter with a default.
    pub fn select<I, S>(description: impl Into<String>, options: I, default: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: ParameterKind::Select,
            required: false,
            default: Some(Value::from(default)),
            description: description.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

/// Mapping from parameter name to its description.
///
/// Serializes to a JSON object suitable for driving configuration forms:
///
/// ```json
/// { "width": { "type": "integer", "required": true, "description": "..." } }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_more::Deref)]
#[serde(transparent)]
pub struct ConfigSchema(BTreeMap<String, ParameterSpec>);

impl ConfigSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style.
    pub fn with(mut self, name: impl Into<String>, spec: ParameterSpec) -> Self {
        self.0.insert(name.into(), spec);
        self
    }

    /// Check parameters against this schema.
    ///
    /// Required parameters must be present and every present value must
    /// have the declared type. Values of `select` parameters outside the
    /// listed options are left for the transform to interpret. Unknown
    /// parameters are ignored with a debug log.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first offending parameter.
    pub fn validate(&self, params: &Params) -> AmbryResult<()> {
        for (name, spec) in &self.0 {
            match spec.kind {
                ParameterKind::Integer => {
                    if params.int_param(name)?.is_none() && spec.required {
                        return Err(missing(name));
                    }
                }
                ParameterKind::String | ParameterKind::Select => {
                    if params.str_param(name)?.is_none() && spec.required {
                        return Err(missing(name));
                    }
                }
            }
        }

        for key in params.keys().filter(|key| !self.0.contains_key(*key)) {
            tracing::debug!(parameter = %key, "Ignoring unknown parameter");
        }
        Ok(())
    }
}

fn missing(name: &str) -> ambry_error::AmbryError {
    ConfigError::new(format!("Missing required parameter '{}'", name)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ConfigSchema {
        ConfigSchema::new()
            .with("width", ParameterSpec::required_integer("Width"))
            .with("quality", ParameterSpec::integer("Quality", 80))
            .with("fit", ParameterSpec::select("Fit", ["fill", "cover"], "cover"))
    }

    #[test]
    fn test_validate_ok() {
        let params = Params::new().with("width", 10).with("fit", "fill");
        assert!(schema().validate(&params).is_ok());
    }

    #[test]
    fn test_validate_missing_required() {
        let params = Params::new().with("quality", 50);
        assert!(schema().validate(&params).unwrap_err().is_config());
    }

    #[test]
    fn test_validate_wrong_type() {
        let params = Params::new().with("width", "ten");
        assert!(schema().validate(&params).is_err());
        let params = Params::new().with("width", 10).with("fit", 3);
        assert!(schema().validate(&params).is_err());
    }

    #[test]
    fn test_select_outside_options_passes() {
        let params = Params::new().with("width", 10).with("fit", "stretch");
        assert!(schema().validate(&params).is_ok());
    }

    #[test]
    fn test_serializes_for_forms() {
        let json = serde_json::to_value(schema()).unwrap();
        assert_eq!(json["width"]["type"], "integer");
        assert_eq!(json["width"]["required"], true);
        assert!(json["width"].get("default").is_none());
        assert_eq!(json["quality"]["default"], 80);
        assert_eq!(json["fit"]["options"][1], "cover");
    }
}
