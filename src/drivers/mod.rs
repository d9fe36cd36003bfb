//! Built-in driver implementations
//!
//! Every driver module exposes its registry `NAME`, a `register` function and
//! the driver type itself. [`register_builtin`] registers all of them.

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "elasticsearch")]
pub mod elasticsearch;
#[cfg(feature = "file")]
pub mod file;
pub mod json;

#[cfg(feature = "console")]
pub use console::ConsoleDriver;
#[cfg(feature = "elasticsearch")]
pub use elasticsearch::ElasticsearchDriver;
#[cfg(feature = "file")]
pub use file::FileDriver;
pub use json::JsonDriver;

use crate::core::{DriverOptions, DriverRegistry, Result, TelemetryError};
use serde::Deserialize;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Register every driver compiled into this crate
pub fn register_builtin(registry: &DriverRegistry) -> Result<()> {
    #[cfg(feature = "console")]
    console::register(registry)?;
    #[cfg(feature = "file")]
    file::register(registry)?;
    json::register(registry)?;
    #[cfg(feature = "elasticsearch")]
    elasticsearch::register(registry)?;
    Ok(())
}

/// File-backed drivers accept either a bare path string or `{"path": "..."}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PathOptions {
    Bare(PathBuf),
    Object { path: PathBuf },
}

pub(crate) fn path_from_options(driver: &str, options: &DriverOptions) -> Result<PathBuf> {
    let path = match options.decode::<PathOptions>()? {
        PathOptions::Bare(path) | PathOptions::Object { path } => path,
    };
    if path.as_os_str().is_empty() {
        return Err(TelemetryError::config(driver, "file path must not be empty"));
    }
    Ok(path)
}

pub(crate) fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| TelemetryError::io_operation("opening log file", path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_from_bare_string() {
        let options = DriverOptions::new(json!("/tmp/app.log"));
        assert_eq!(path_from_options("file", &options).unwrap(), PathBuf::from("/tmp/app.log"));
    }

    #[test]
    fn test_path_from_object() {
        let options = DriverOptions::new(json!({"path": "/tmp/app.jsonl"}));
        assert_eq!(path_from_options("json", &options).unwrap(), PathBuf::from("/tmp/app.jsonl"));
    }

    #[test]
    fn test_empty_path_rejected() {
        let options = DriverOptions::new(json!(""));
        let err = path_from_options("file", &options).unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_malformed_options_rejected() {
        let options = DriverOptions::new(json!(17));
        assert!(matches!(
            path_from_options("file", &options),
            Err(TelemetryError::Json(_))
        ));
    }

    #[test]
    fn test_register_builtin_is_not_repeatable() {
        let registry = DriverRegistry::new();
        register_builtin(&registry).unwrap();
        assert!(registry.contains(json::NAME));
        assert!(matches!(
            register_builtin(&registry),
            Err(TelemetryError::DuplicateDriver { .. })
        ));
    }
}
