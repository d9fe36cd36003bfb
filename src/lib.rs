//! # Rust Telemetry
//!
//! A structured logging core that separates producing log records from
//! delivering them.
//!
//! ## Features
//!
//! - **Pluggable Drivers**: Sinks are registered by name in a [`DriverRegistry`]
//!   and chosen by configuration
//! - **Level Filtering**: Records below the minimum level never reach the driver
//! - **Default Tags**: Logger-wide tags merged into every record, caller tags win
//! - **Transactions**: Correlate a sequence of records under one generated id
//! - **Thread Safe**: One logger can be shared across threads
//!
//! ## Example
//!
//! ```
//! use rust_telemetry::prelude::*;
//! use rust_telemetry::tags;
//! use serde_json::json;
//!
//! let registry = DriverRegistry::with_builtin_drivers()?;
//! let config = TelemetryConfig::new("console", json!({"colors": false}))
//!     .with_log_level(LogLevel::Info)
//!     .with_default_tag("service", "checkout");
//!
//! let logger = Logger::new(config, &registry)?;
//! let id = logger.start_transaction();
//! logger.info("order placed", tags! { "order" => 42 }, Some(&id))?;
//! logger.end_transaction(&id)?;
//! logger.close()?;
//! # Ok::<(), rust_telemetry::TelemetryError>(())
//! ```

pub mod core;
pub mod drivers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        DispatchStrategy, Driver, DriverOptions, DriverRegistry, LogLevel, LogRecord, Logger,
        LoggerBuilder, Result, Tags, TelemetryConfig, TelemetryError,
    };
}

pub use core::{
    generate_transaction_id, merge_tags, DispatchStrategy, Driver, DriverConstructor,
    DriverOptions, DriverRegistry, LogLevel, LogRecord, Logger, LoggerBuilder, Result, Tags,
    TelemetryConfig, TelemetryError, Transaction, TransactionTable,
};
