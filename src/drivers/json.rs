//! JSON Lines driver for structured logging

use super::{open_append, path_from_options};
use crate::core::{Driver, DriverRegistry, LogRecord, Result, TelemetryError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub const NAME: &str = "json";

pub fn register(registry: &DriverRegistry) -> Result<()> {
    registry.register(NAME, |options| {
        let path = path_from_options(NAME, options)?;
        Ok(Box::new(JsonDriver::new(path)?) as Box<dyn Driver>)
    })
}

/// Writes each record as a single-line JSON object (JSONL format)
///
/// Compatible with log aggregation tools like ELK, Loki, etc.
pub struct JsonDriver {
    writer: Option<BufWriter<File>>,
}

impl JsonDriver {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let file = open_append(&path.into())?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
        })
    }
}

impl Driver for JsonDriver {
    fn log(&mut self, record: &LogRecord) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| TelemetryError::delivery(NAME, "json driver is closed"))?;

        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        NAME
    }
}

impl Drop for JsonDriver {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
