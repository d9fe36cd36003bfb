//! Console driver implementation

use crate::core::{Driver, DriverOptions, DriverRegistry, LogLevel, LogRecord, Result};
use chrono::SecondsFormat;
use colored::Colorize;
use serde::Deserialize;

pub const NAME: &str = "console";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct ConsoleOptions {
    colors: bool,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self { colors: true }
    }
}

pub fn register(registry: &DriverRegistry) -> Result<()> {
    registry.register(NAME, |options| {
        Ok(Box::new(ConsoleDriver::from_options(options)?) as Box<dyn Driver>)
    })
}

/// Prints one line per record; errors go to stderr, everything else to stdout.
pub struct ConsoleDriver {
    use_colors: bool,
}

impl ConsoleDriver {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Any options value is accepted; only an object can override `colors`.
    fn from_options(options: &DriverOptions) -> Result<Self> {
        let options = if options.as_value().is_object() {
            options.decode::<ConsoleOptions>()?
        } else {
            ConsoleOptions::default()
        };
        Ok(Self::with_colors(options.colors))
    }

    fn format_line(&self, record: &LogRecord) -> String {
        let level_str = if self.use_colors {
            format!("{:7}", record.level.to_str())
                .color(record.level.color_code())
                .to_string()
        } else {
            format!("{:7}", record.level.to_str())
        };

        let mut line = format!(
            "[{}] [{}] {}",
            record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            level_str,
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

        line
    }
}

impl Default for ConsoleDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for ConsoleDriver {
    fn log(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.format_line(record);
        match record.level {
            LogLevel::Error => eprintln!("{}", line),
            _ => println!("{}", line),
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        NAME
    }
}
