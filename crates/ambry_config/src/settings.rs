//! Configuration records and loading.

use crate::Params;
use ambry_error::{AmbryError, AmbryResult, ConfigError};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};

/// One configured storage backend.
///
/// ```toml
/// [[storage]]
/// name = "default"
/// type = "filesystem"
/// path = "./data"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Lookup key used by the backend registry
    pub name: String,
    /// Backend implementation to instantiate
    #[serde(rename = "type")]
    pub kind: String,
    /// Backend-specific parameters (every other key)
    #[serde(flatten)]
    pub params: Params,
}

impl BackendConfig {
    /// Create a backend configuration record.
    pub fn new(name: impl Into<String>, kind: impl Into<String>, params: Params) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            params,
        }
    }
}

/// One configured transform.
///
/// ```toml
/// [[transforms]]
/// name = "thumb"
/// type = "resize"
/// width = 200
/// height = 200
/// fit = "cover"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Name the transform is requested by
    pub name: String,
    /// Transform implementation to instantiate
    #[serde(rename = "type")]
    pub kind: String,
    /// Transform-specific parameters (every other key)
    #[serde(flatten)]
    pub params: Params,
}

impl TransformConfig {
    /// Create a transform configuration record.
    pub fn new(name: impl Into<String>, kind: impl Into<String>, params: Params) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            params,
        }
    }
}

/// Top-level Ambry configuration.
///
/// Populated once at startup and treated as read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AmbryConfig {
    /// Configured storage backends
    #[serde(default)]
    pub storage: Vec<BackendConfig>,

    /// Configured transforms
    #[serde(default)]
    pub transforms: Vec<TransformConfig>,

    /// Explicit bucket name to backend name mapping
    #[serde(default)]
    pub buckets: HashMap<String, String>,

    /// Backend serving every name that is not otherwise resolvable.
    ///
    /// Unset by default, in which case unknown names are an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_backend: Option<String>,
}

fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> AmbryResult<AmbryConfig> {
    builder
        .build()
        .map_err(|e| {
            AmbryError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?
        .try_deserialize()
        .map_err(|e| {
            AmbryError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })
}

impl AmbryConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> AmbryResult<Self> {
        debug!("Loading configuration from file");
        build(Config::builder().add_source(File::from(path.as_ref())))
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(source: &str) -> AmbryResult<Self> {
        build(Config::builder().add_source(File::from_str(source, FileFormat::Toml)))
    }

    /// Load configuration with precedence: explicit path > current dir > home dir.
    ///
    /// Sources in order of precedence (later sources override earlier):
    /// 1. `~/.config/ambry/ambry.toml` (optional)
    /// 2. `./ambry.toml` (optional)
    /// 3. `path`, when given (required)
    #[instrument(skip(path))]
    pub fn load(path: Option<&Path>) -> AmbryResult<Self> {
        let mut builder = Config::builder();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/ambry/ambry.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("ambry").required(false));

        if let Some(path) = path {
            debug!(path = %path.display(), "Adding explicit configuration file");
            builder = builder.add_source(File::from(path));
        }

        build(builder)
    }

    /// Look up a backend configuration by name.
    pub fn backend(&self, name: &str) -> Option<&BackendConfig> {
        self.storage.iter().find(|b| b.name == name)
    }

    /// Look up a transform configuration by name.
    pub fn transform(&self, name: &str) -> Option<&TransformConfig> {
        self.transforms.iter().find(|t| t.name == name)
    }

    /// Name of the backend explicitly mapped to a bucket.
    pub fn backend_for_bucket(&self, bucket: &str) -> Option<&str> {
        self.buckets.get(bucket).map(String::as_str)
    }
}
