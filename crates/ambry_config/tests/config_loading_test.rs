//! Tests for configuration loading.

use ambry_config::{AmbryConfig, Params};
use std::io::Write;

const SAMPLE: &str = r#"
fallback_backend = "default"

[[storage]]
name = "default"
type = "filesystem"
path = "./data"

[[storage]]
name = "archive"
type = "disk"
path = "/srv/archive"

[buckets]
old-photos = "archive"

[[transforms]]
name = "thumb"
type = "resize"
width = 200
height = 150
fit = "contain"
"#;

#[test]
fn test_parse_backends_and_transforms() {
    let config = AmbryConfig::from_toml_str(SAMPLE).unwrap();

    assert_eq!(config.storage.len(), 2);
    let default = config.backend("default").unwrap();
    assert_eq!(default.kind, "filesystem");
    assert_eq!(default.params.required_str("path").unwrap(), "./data");
    assert!(!default.params.contains_key("name"));
    assert!(!default.params.contains_key("type"));

    let thumb = config.transform("thumb").unwrap();
    assert_eq!(thumb.kind, "resize");
    assert_eq!(thumb.params.required_int("width").unwrap(), 200);
    assert_eq!(thumb.params.required_int("height").unwrap(), 150);
    assert_eq!(thumb.params.str_param("fit").unwrap(), Some("contain"));
}

#[test]
fn test_bucket_mapping_and_fallback() {
    let config = AmbryConfig::from_toml_str(SAMPLE).unwrap();
    assert_eq!(config.backend_for_bucket("old-photos"), Some("archive"));
    assert_eq!(config.backend_for_bucket("other"), None);
    assert_eq!(config.fallback_backend.as_deref(), Some("default"));
}

#[test]
fn test_empty_config() {
    let config = AmbryConfig::from_toml_str("").unwrap();
    assert!(config.storage.is_empty());
    assert!(config.transforms.is_empty());
    assert!(config.fallback_backend.is_none());
}

#[test]
fn test_missing_type_is_config_error() {
    let err = AmbryConfig::from_toml_str("[[storage]]\nname = \"x\"\n").unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(file, "{}", SAMPLE).unwrap();

    let config = AmbryConfig::from_file(file.path()).unwrap();
    assert!(config.backend("archive").is_some());
    assert!(config.backend("missing").is_none());
}

#[test]
fn test_from_missing_file() {
    let err = AmbryConfig::from_file("/definitely/not/here.toml").unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_params_builder() {
    let params = Params::new().with("path", "/tmp/data");
    assert_eq!(params.required_str("path").unwrap(), "/tmp/data");
}
