//! File driver implementation

use super::{open_append, path_from_options};
use crate::core::{Driver, DriverRegistry, LogRecord, Result, TelemetryError};
use chrono::SecondsFormat;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub const NAME: &str = "file";

pub fn register(registry: &DriverRegistry) -> Result<()> {
    registry.register(NAME, |options| {
        let path = path_from_options(NAME, options)?;
        Ok(Box::new(FileDriver::new(path)?) as Box<dyn Driver>)
    })
}

/// Appends one text line per record:
/// `<timestamp> <LEVEL> <message> <key=value ...> [transaction=<id>]`
pub struct FileDriver {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileDriver {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    fn format_line(record: &LogRecord) -> String {
        let mut line = format!(
            "{} {} {}",
            record.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            record.level,
            record.sanitized_message()
        );

        if !record.tags.is_empty() {
            line.push(' ');
            line.push_str(&record.format_tags());
        }

        if let Some(ref id) = record.transaction_id {
            line.push_str(" transaction=");
            line.push_str(id);
        }

        line.push('\n');
        line
    }
}

impl Driver for FileDriver {
    fn log(&mut self, record: &LogRecord) -> Result<()> {
        let path = &self.path;
        let writer = self.writer.as_mut().ok_or_else(|| {
            TelemetryError::delivery(NAME, format!("{} is closed", path.display()))
        })?;

        writer.write_all(Self::format_line(record).as_bytes())?;
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

impl Drop for FileDriver {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
