//! Error types for the telemetry core and its drivers

pub type Result<T> = std::result::Result<T, TelemetryError>;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// A driver was registered under a name that is already taken
    #[error("driver already registered: {name}")]
    DuplicateDriver { name: String },

    /// The configuration names a driver that was never registered
    #[error("unknown driver: {name}")]
    UnknownDriver { name: String },

    /// Resolving or constructing the driver failed, no logger was built
    #[error("failed to create logger with driver '{driver}': {source}")]
    LoggerConstructionFailed {
        driver: String,
        #[source]
        source: Box<TelemetryError>,
    },

    /// A driver could not deliver a record or release its resources
    #[error("driver '{driver}' failed: {message}")]
    DriverDeliveryFailed { driver: String, message: String },

    /// `end_transaction` was called with an id that is not active
    #[error("transaction {id} doesn't exist")]
    UnknownTransaction { id: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error
    #[cfg(feature = "elasticsearch")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TelemetryError {
    pub fn duplicate_driver(name: impl Into<String>) -> Self {
        TelemetryError::DuplicateDriver { name: name.into() }
    }

    pub fn unknown_driver(name: impl Into<String>) -> Self {
        TelemetryError::UnknownDriver { name: name.into() }
    }

    pub fn unknown_transaction(id: impl Into<String>) -> Self {
        TelemetryError::UnknownTransaction { id: id.into() }
    }

    /// Wrap a resolution failure into the error returned by logger construction
    pub fn construction_failed(driver: impl Into<String>, source: TelemetryError) -> Self {
        TelemetryError::LoggerConstructionFailed {
            driver: driver.into(),
            source: Box::new(source),
        }
    }

    /// Create a delivery error for drivers that fail without an underlying IO or JSON error
    pub fn delivery(driver: impl Into<String>, message: impl Into<String>) -> Self {
        TelemetryError::DriverDeliveryFailed {
            driver: driver.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        TelemetryError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        TelemetryError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = TelemetryError::duplicate_driver("console");
        assert_eq!(err.to_string(), "driver already registered: console");

        let err = TelemetryError::unknown_driver("missing");
        assert_eq!(err.to_string(), "unknown driver: missing");

        let err = TelemetryError::unknown_transaction("abc");
        assert_eq!(err.to_string(), "transaction abc doesn't exist");

        let err = TelemetryError::delivery("http", "status 503");
        assert_eq!(err.to_string(), "driver 'http' failed: status 503");
    }

    #[test]
    fn test_construction_failed_keeps_source() {
        let err = TelemetryError::construction_failed(
            "missing",
            TelemetryError::unknown_driver("missing"),
        );

        assert!(err.to_string().contains("unknown driver: missing"));
        let source = err.source().expect("construction error has a source");
        assert_eq!(source.to_string(), "unknown driver: missing");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = TelemetryError::io_operation("opening config file", "config.json", io_err);

        assert!(matches!(err, TelemetryError::IoOperation { .. }));
        assert!(err.to_string().contains("opening config file"));
        assert!(err.source().is_some());
    }
}
