//! Backend factory and name-to-backend registry.

use ambry_config::{AmbryConfig, BackendConfig};
use ambry_error::{AmbryResult, ConfigError};
use ambry_storage::{FileSystemStorage, Storage};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Builds one backend instance from its configuration record.
pub type BackendConstructor = fn(&BackendConfig) -> AmbryResult<Arc<dyn Storage>>;

/// Table of backend implementations keyed by configuration `type`.
///
/// New backends are added with [`register`](Self::register); callers that
/// go through the factory never name a concrete backend type.
///
/// # Example
///
/// ```rust
/// use ambry::{BackendConfig, Params, StorageFactory};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let factory = StorageFactory::default();
/// let dir = std::env::temp_dir().join("ambry-factory-doc");
/// let config = BackendConfig::new(
///     "default",
///     "filesystem",
///     Params::new().with("path", dir.to_string_lossy().as_ref()),
/// );
/// let storage = factory.create_backend(&config)?;
/// storage.create_bucket("docs")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StorageFactory {
    constructors: HashMap<String, BackendConstructor>,
}

impl StorageFactory {
    /// Create a factory with no backend types registered.
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register a backend type, replacing any previous constructor for it.
    pub fn register(&mut self, kind: impl Into<String>, constructor: BackendConstructor) {
        self.constructors.insert(kind.into(), constructor);
    }

    /// Registered backend type names, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Construct the backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the type is unknown or its parameters are
    /// invalid, or any error the backend raises while starting up.
    #[instrument(skip(self, config), fields(name = %config.name, kind = %config.kind))]
    pub fn create_backend(&self, config: &BackendConfig) -> AmbryResult<Arc<dyn Storage>> {
        debug!("Creating storage backend");
        let constructor = self.constructors.get(&config.kind).ok_or_else(|| {
            ConfigError::new(format!(
                "Unknown storage type '{}' for backend '{}'",
                config.kind, config.name
            ))
        })?;
        constructor(config)
    }
}

impl Default for StorageFactory {
    fn default() -> Self {
        let mut factory = Self::new();
        factory.register("filesystem", create_filesystem);
        factory.register("disk", create_filesystem);
        factory
    }
}

fn create_filesystem(config: &BackendConfig) -> AmbryResult<Arc<dyn Storage>> {
    let path = config.params.required_str("path")?;
    Ok(Arc::new(FileSystemStorage::new(path)?))
}

/// Configured backend instances and the policy mapping names onto them.
///
/// Every backend is constructed once, up front; the registry is read-only
/// afterwards and can be shared between concurrent callers.
///
/// [`resolve_backend`](Self::resolve_backend) consults, in order:
/// 1. the explicit `[buckets]` mapping,
/// 2. a backend whose own name matches,
/// 3. the configured `fallback_backend`, if any.
#[derive(Clone)]
pub struct BackendRegistry {
    backends: HashMap<String, Arc<dyn Storage>>,
    buckets: HashMap<String, String>,
    fallback: Option<String>,
}

impl BackendRegistry {
    /// Build every configured backend with the default factory.
    pub fn from_config(config: &AmbryConfig) -> AmbryResult<Self> {
        Self::with_factory(config, &StorageFactory::default())
    }

    /// Build every configured backend with the given factory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for duplicate backend names, unknown types,
    /// and bucket mappings or a fallback naming an unconfigured backend.
    #[instrument(skip_all, fields(backends = config.storage.len()))]
    pub fn with_factory(config: &AmbryConfig, factory: &StorageFactory) -> AmbryResult<Self> {
        let mut backends = HashMap::new();
        for backend in &config.storage {
            if backends.contains_key(&backend.name) {
                return Err(ConfigError::new(format!(
                    "Storage backend '{}' configured more than once",
                    backend.name
                ))
                .into());
            }
            backends.insert(backend.name.clone(), factory.create_backend(backend)?);
        }

        let unknown = config
            .buckets
            .values()
            .chain(config.fallback_backend.iter())
            .find(|name| !backends.contains_key(*name));
        if let Some(name) = unknown {
            return Err(ConfigError::new(format!(
                "Storage backend '{}' is referenced but not configured",
                name
            ))
            .into());
        }

        info!(count = backends.len(), "Initialized storage backends");
        Ok(Self {
            backends,
            buckets: config.buckets.clone(),
            fallback: config.fallback_backend.clone(),
        })
    }

    /// Resolve the backend serving a bucket or backend name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if nothing is configured for `name`.
    #[instrument(skip(self))]
    pub fn resolve_backend(&self, name: &str) -> AmbryResult<Arc<dyn Storage>> {
        if let Some(backend) = self.buckets.get(name) {
            debug!(backend = %backend, "Resolved through bucket mapping");
            return self.backend(backend);
        }

        if let Some(storage) = self.backends.get(name) {
            return Ok(Arc::clone(storage));
        }

        if let Some(fallback) = &self.fallback {
            debug!(backend = %fallback, "Resolved to fallback backend");
            return self.backend(fallback);
        }

        Err(ConfigError::new(format!("Storage backend for '{}' not found", name)).into())
    }

    /// Names of all configured backends, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn backend(&self, name: &str) -> AmbryResult<Arc<dyn Storage>> {
        self.backends.get(name).cloned().ok_or_else(|| {
            ConfigError::new(format!("Storage backend '{}' not configured", name)).into()
        })
    }
}
