//! Transform factory and configured transform registry.

use ambry_config::{AmbryConfig, Params, TransformConfig};
use ambry_error::{AmbryResult, ConfigError};
use ambry_transform::{ConfigSchema, ResizeTransform, Transform};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Builds one transform instance from its name and parameters.
pub type TransformConstructor = fn(&str, &Params) -> AmbryResult<Arc<dyn Transform>>;

#[derive(Clone, Copy)]
struct TransformEntry {
    schema: fn() -> ConfigSchema,
    construct: TransformConstructor,
}

/// Table of transform implementations keyed by configuration `type`.
///
/// Each entry carries its configuration schema so it can be inspected
/// before any transform is constructed.
#[derive(Clone)]
pub struct TransformFactory {
    entries: HashMap<String, TransformEntry>,
}

impl TransformFactory {
    /// Create a factory with no transform types registered.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a transform type with its schema and constructor.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        schema: fn() -> ConfigSchema,
        construct: TransformConstructor,
    ) {
        self.entries
            .insert(kind.into(), TransformEntry { schema, construct });
    }

    /// Registered transform type names, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    fn entry(&self, kind: &str) -> AmbryResult<&TransformEntry> {
        self.entries
            .get(kind)
            .ok_or_else(|| ConfigError::new(format!("Unknown transform type '{}'", kind)).into())
    }

    /// Configuration schema of a transform type.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the type is unknown.
    pub fn schema(&self, kind: &str) -> AmbryResult<ConfigSchema> {
        Ok((self.entry(kind)?.schema)())
    }

    /// Construct a transform of type `kind` from a configuration record.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the type is unknown or the parameters are
    /// missing or malformed.
    #[instrument(skip(self, config), fields(name = %config.name))]
    pub fn create_transform(
        &self,
        kind: &str,
        config: &TransformConfig,
    ) -> AmbryResult<Arc<dyn Transform>> {
        debug!("Creating transform");
        (self.entry(kind)?.construct)(&config.name, &config.params)
    }
}

impl Default for TransformFactory {
    fn default() -> Self {
        let mut factory = Self::new();
        factory.register(ResizeTransform::TYPE_NAME, ResizeTransform::schema, |name, params| {
            Ok(Arc::new(ResizeTransform::from_params(name, params)?))
        });
        factory
    }
}

/// Configured transform instances, looked up by name or content type.
#[derive(Clone, Default)]
pub struct TransformRegistry {
    transforms: Vec<Arc<dyn Transform>>,
}

impl TransformRegistry {
    /// Build every configured transform with the default factory.
    pub fn from_config(config: &AmbryConfig) -> AmbryResult<Self> {
        Self::with_factory(config, &TransformFactory::default())
    }

    /// Build every configured transform with the given factory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for duplicate names, unknown types and invalid
    /// parameters.
    #[instrument(skip_all, fields(transforms = config.transforms.len()))]
    pub fn with_factory(config: &AmbryConfig, factory: &TransformFactory) -> AmbryResult<Self> {
        let mut transforms: Vec<Arc<dyn Transform>> = Vec::new();
        for transform in &config.transforms {
            if transforms.iter().any(|t| t.name() == transform.name) {
                return Err(ConfigError::new(format!(
                    "Transform '{}' configured more than once",
                    transform.name
                ))
                .into());
            }
            transforms.push(factory.create_transform(&transform.kind, transform)?);
        }

        info!(count = transforms.len(), "Initialized transforms");
        Ok(Self { transforms })
    }

    /// Look up a transform by its configured name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Transform>> {
        self.transforms.iter().find(|t| t.name() == name).cloned()
    }

    /// Transforms able to process the given content type, in configuration order.
    pub fn for_mime_type(&self, mime: &str) -> Vec<Arc<dyn Transform>> {
        self.transforms
            .iter()
            .filter(|t| t.accepts(mime))
            .cloned()
            .collect()
    }

    /// Names of all configured transforms, in configuration order.
    pub fn names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}
