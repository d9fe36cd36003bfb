//! Logger configuration and its file loader

use super::{
    driver::DriverOptions,
    error::{Result, TelemetryError},
    log_level::LogLevel,
    record::Tags,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Which driver to use, how to build it, and how to filter and tag records.
///
/// JSON form:
///
/// ```json
/// {
///     "driver": "file",
///     "driver_config": "/var/log/app.log",
///     "log_level": 1,
///     "default_tags": {"environment": "production"}
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub driver: String,

    #[serde(default)]
    pub driver_config: DriverOptions,

    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub default_tags: Tags,
}

impl TelemetryConfig {
    pub fn new(driver: impl Into<String>, driver_config: impl Into<DriverOptions>) -> Self {
        Self {
            driver: driver.into(),
            driver_config: driver_config.into(),
            log_level: LogLevel::default(),
            default_tags: Tags::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_default_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_tags.insert(key.into(), value.into());
        self
    }

    /// Read, decode and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            TelemetryError::io_operation(
                "opening config file",
                path.display().to_string(),
                e,
            )
        })?;

        let config: TelemetryConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Decode and validate a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TelemetryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field and report all problems at once
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.driver.is_empty() {
            problems.push("no driver specified");
        }

        if self.driver_config.is_empty() {
            problems.push("empty driver config");
        }

        for (key, value) in &self.default_tags {
            if key.is_empty() {
                problems.push("default tag has empty key");
            }
            if value.is_empty() {
                problems.push("default tag has empty value");
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(TelemetryError::config(
                "config",
                format!("validation failed: {}", problems.join("; ")),
            ))
        }
    }
}
