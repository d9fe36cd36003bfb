//! Driver trait for log delivery sinks

use super::{error::Result, record::LogRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A sink that receives every record the logger lets through.
///
/// Errors returned here reach the caller of the logging operation unchanged.
/// `close` may be called more than once; drivers decide whether that is harmless.
pub trait Driver: Send {
    fn log(&mut self, record: &LogRecord) -> Result<()>;
    fn close(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Builds a driver from its sink-specific options.
pub type DriverConstructor = Arc<dyn Fn(&DriverOptions) -> Result<Box<dyn Driver>> + Send + Sync>;

/// Sink-specific options, opaque to the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverOptions(serde_json::Value);

impl DriverOptions {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// True when no options were supplied at all
    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Decode into a driver's own option type
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.0)?)
    }
}

impl From<serde_json::Value> for DriverOptions {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
