//! CLI command handlers.

use super::{Commands, ListFormat};
use ambry::{
    AmbryConfig, AmbryResult, BackendRegistry, ConfigError, Storage, StorageError,
    StorageErrorKind, TransformFactory, TransformRegistry, read_transformed,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Execute one CLI command against the configured backends.
pub fn handle_command(config: &AmbryConfig, command: Commands) -> AmbryResult<()> {
    let backends = BackendRegistry::from_config(config)?;

    match command {
        Commands::Buckets {
            backend,
            start,
            limit,
        } => {
            for bucket in backends.resolve_backend(&backend)?.list_buckets(start, limit)? {
                println!("{}", bucket);
            }
        }

        Commands::Mkbucket { bucket } => {
            backends.resolve_backend(&bucket)?.create_bucket(&bucket)?;
            println!("Created bucket {}", bucket);
        }

        Commands::Rmbucket { bucket } => {
            backends.resolve_backend(&bucket)?.delete_bucket(&bucket)?;
            println!("Deleted bucket {}", bucket);
        }

        Commands::Files {
            bucket,
            start,
            limit,
            format,
        } => {
            let files = backends
                .resolve_backend(&bucket)?
                .list_files(&bucket, start, limit)?;
            match format {
                ListFormat::Human => {
                    for file in &files {
                        println!(
                            "{:>12}  {}  {}",
                            file.size(),
                            file.modified().format("%Y-%m-%d %H:%M:%S"),
                            file.name()
                        );
                    }
                }
                ListFormat::Json => print_json(&files)?,
            }
        }

        Commands::Stat { bucket, file } => {
            let entry = backends.resolve_backend(&bucket)?.stat(&bucket, &file)?;
            print_json(&entry)?;
        }

        Commands::Put {
            bucket,
            file,
            source,
        } => {
            let storage = backends.resolve_backend(&bucket)?;
            let mut writer = storage.open_write(&bucket, &file)?;
            let copied = match source {
                Some(path) => {
                    let mut input = File::open(&path).map_err(|e| {
                        StorageError::new(StorageErrorKind::FileRead(format!(
                            "{}: {}",
                            path.display(),
                            e
                        )))
                    })?;
                    std::io::copy(&mut input, &mut writer)
                }
                None => std::io::copy(&mut std::io::stdin().lock(), &mut writer),
            };
            copied.map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!("{}/{}: {}", bucket, file, e)))
            })?;
            let entry = writer.finish()?;
            println!("Stored {}/{} ({} bytes)", bucket, entry.name(), entry.size());
        }

        Commands::Get {
            bucket,
            file,
            output,
            transform,
        } => {
            let storage = backends.resolve_backend(&bucket)?;
            match output {
                Some(path) => download_to_path(
                    config,
                    storage.as_ref(),
                    &bucket,
                    &file,
                    transform.as_deref(),
                    &path,
                )?,
                None => {
                    let mut sink = std::io::stdout().lock();
                    download(
                        config,
                        storage.as_ref(),
                        &bucket,
                        &file,
                        transform.as_deref(),
                        &mut sink,
                    )?;
                    sink.flush().map_err(|e| {
                        StorageError::new(StorageErrorKind::FileWrite(e.to_string()))
                    })?;
                }
            }
        }

        Commands::Rm { bucket, file } => {
            backends.resolve_backend(&bucket)?.delete_file(&bucket, &file)?;
            println!("Deleted {}/{}", bucket, file);
        }

        Commands::Transforms => print_json(&transforms_report(config)?)?,
    }

    Ok(())
}

/// Copy a stored file, optionally transformed, into `sink`.
fn download(
    config: &AmbryConfig,
    storage: &dyn Storage,
    bucket: &str,
    file: &str,
    transform: Option<&str>,
    sink: &mut dyn Write,
) -> AmbryResult<()> {
    match transform {
        Some(name) => {
            let transforms = TransformRegistry::from_config(config)?;
            let transform = transforms
                .get(name)
                .ok_or_else(|| ConfigError::new(format!("Transform '{}' not configured", name)))?;
            let mime = read_transformed(storage, bucket, file, transform.as_ref(), sink)?;
            tracing::info!(mime = %mime, "Wrote transformed output");
        }
        None => {
            let mut reader = storage.open_read(bucket, file)?;
            std::io::copy(&mut reader, sink).map_err(|e| {
                StorageError::new(StorageErrorKind::FileRead(format!("{}/{}: {}", bucket, file, e)))
            })?;
        }
    }
    Ok(())
}

/// Download into a temporary sibling of `path`, persisted only on success.
fn download_to_path(
    config: &AmbryConfig,
    storage: &dyn Storage,
    bucket: &str,
    file: &str,
    transform: Option<&str>,
    path: &Path,
) -> AmbryResult<()> {
    let write_err = |e: std::io::Error| {
        StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", path.display(), e)))
    };

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut staged = NamedTempFile::new_in(parent).map_err(write_err)?;
    {
        let mut sink = BufWriter::new(staged.as_file_mut());
        download(config, storage, bucket, file, transform, &mut sink)?;
        sink.flush().map_err(write_err)?;
    }
    staged.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Schemas of every registered transform type plus the configured names.
fn transforms_report(config: &AmbryConfig) -> AmbryResult<serde_json::Value> {
    let factory = TransformFactory::default();
    let mut types = serde_json::Map::new();
    for kind in factory.kinds() {
        let schema = serde_json::to_value(factory.schema(kind)?)
            .map_err(|e| ConfigError::new(e.to_string()))?;
        types.insert(kind.to_string(), schema);
    }

    let configured = TransformRegistry::from_config(config)?;
    Ok(serde_json::json!({
        "types": types,
        "configured": configured.names(),
    }))
}

fn print_json(value: &impl serde::Serialize) -> AmbryResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ConfigError::new(format!("Failed to render JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, AmbryConfig) {
        let dir = TempDir::new().unwrap();
        let config = AmbryConfig::from_toml_str(&format!(
            r#"
[[storage]]
name = "photos"
type = "filesystem"
path = "{}"

[[transforms]]
name = "thumb"
type = "resize"
width = 10
height = 10
"#,
            dir.path().join("data").display()
        ))
        .unwrap();
        let backends = BackendRegistry::from_config(&config).unwrap();
        let storage = backends.resolve_backend("photos").unwrap();
        storage.create_bucket("photos").unwrap();
        storage.write_bytes("photos", "notes.txt", b"hello").unwrap();
        storage.write_bytes("photos", "broken.png", b"not a png").unwrap();
        (dir, config)
    }

    fn get(file: &str, output: &Path, transform: Option<&str>) -> Commands {
        Commands::Get {
            bucket: "photos".to_string(),
            file: file.to_string(),
            output: Some(output.to_path_buf()),
            transform: transform.map(str::to_string),
        }
    }

    #[test]
    fn test_get_writes_output_file() {
        let (dir, config) = setup();
        let output = dir.path().join("notes.txt");
        handle_command(&config, get("notes.txt", &output, None)).unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), b"hello");
    }

    #[test]
    fn test_failed_get_leaves_no_output() {
        let (dir, config) = setup();

        let output = dir.path().join("missing.txt");
        let err = handle_command(&config, get("missing.txt", &output, None)).unwrap_err();
        assert!(err.is_no_such_file());
        assert!(!output.exists());

        let output = dir.path().join("broken.webp");
        assert!(handle_command(&config, get("broken.png", &output, Some("thumb"))).is_err());
        assert!(!output.exists());

        // only the bucket data directory remains
        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_transforms_report_is_single_json_document() {
        let (_dir, config) = setup();
        let report = transforms_report(&config).unwrap();
        assert!(report["types"]["resize"]["width"].is_object());
        assert_eq!(report["configured"], serde_json::json!(["thumb"]));
    }
}
