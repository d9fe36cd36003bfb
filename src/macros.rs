//! Logging macros for ergonomic tag construction and message formatting.
//!
//! # Examples
//!
//! ```
//! use rust_telemetry::prelude::*;
//! use rust_telemetry::{info, tags};
//! use serde_json::json;
//!
//! let registry = DriverRegistry::with_builtin_drivers().unwrap();
//! let logger = Logger::new(TelemetryConfig::new("console", json!({})), &registry).unwrap();
//!
//! // Formatted message, no tags, no transaction
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).unwrap();
//!
//! // Tags and a transaction go through the methods directly
//! let id = logger.start_transaction();
//! logger.info("Handling request", tags! { "route" => "/health" }, Some(&id)).unwrap();
//! logger.end_transaction(&id).unwrap();
//! ```

/// Build a [`Tags`](crate::Tags) map from `key => value` pairs.
///
/// ```
/// use rust_telemetry::tags;
///
/// let tags = tags! { "env" => "prod", "region" => "eu" };
/// assert_eq!(tags.len(), 2);
/// assert!(tags! {}.is_empty());
/// ```
#[macro_export]
macro_rules! tags {
    () => {
        $crate::Tags::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut tags = $crate::Tags::new();
        $(
            tags.insert(::std::string::ToString::to_string(&$key), ::std::string::ToString::to_string(&$value));
        )+
        tags
    }};
}

/// Log a formatted message at the given level, without tags or transaction.
///
/// Evaluates to the logger's `Result`.
///
/// ```
/// # use rust_telemetry::prelude::*;
/// # use serde_json::json;
/// # let registry = DriverRegistry::with_builtin_drivers().unwrap();
/// # let logger = Logger::new(TelemetryConfig::new("console", json!({})), &registry).unwrap();
/// use rust_telemetry::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), $crate::Tags::new(), None)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use rust_telemetry::prelude::*;
/// # use serde_json::json;
/// # let registry = DriverRegistry::with_builtin_drivers().unwrap();
/// # let logger = Logger::new(TelemetryConfig::new("console", json!({})), &registry).unwrap();
/// use rust_telemetry::error;
/// let code = 503;
/// error!(logger, "Upstream returned {}", code).unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
