//! Core telemetry types and traits

pub mod config;
pub mod driver;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod record;
pub mod registry;
pub mod transaction;

pub use config::TelemetryConfig;
pub use driver::{Driver, DriverConstructor, DriverOptions};
pub use error::{Result, TelemetryError};
pub use log_level::LogLevel;
pub use logger::{DispatchStrategy, Logger, LoggerBuilder};
pub use record::{merge_tags, LogRecord, Tags};
pub use registry::DriverRegistry;
pub use transaction::{generate_transaction_id, Transaction, TransactionTable};
