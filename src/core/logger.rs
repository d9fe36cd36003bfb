//! Main logger implementation

use super::{
    config::TelemetryConfig,
    driver::Driver,
    error::{Result, TelemetryError},
    log_level::LogLevel,
    record::{merge_tags, LogRecord, Tags},
    registry::DriverRegistry,
    transaction::{generate_transaction_id, TransactionTable},
};
use parking_lot::Mutex;

/// How a logger orders driver calls against its other operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchStrategy {
    /// Hold the state lock for the whole driver call.
    ///
    /// Every operation on the logger, including transaction and tag changes,
    /// waits while the driver is busy.
    #[default]
    Serialized,

    /// Build the record under the state lock, then release it before calling the driver.
    ///
    /// Driver calls are still made one at a time, but configuration and
    /// transaction operations no longer wait on driver I/O.
    Snapshot,
}

struct LoggerState {
    config: TelemetryConfig,
    transactions: TransactionTable,
}

/// Filters, tags and forwards records to a single driver, and tracks active transactions.
///
/// Share it between threads with `Arc<Logger>`. Lock order is always state, then driver.
pub struct Logger {
    state: Mutex<LoggerState>,
    driver: Mutex<Box<dyn Driver>>,
    strategy: DispatchStrategy,
}

impl Logger {
    /// Resolve the configured driver through `registry` and wrap it.
    ///
    /// Any resolution failure, unknown driver or constructor error, comes back as
    /// `LoggerConstructionFailed` with the cause attached.
    pub fn new(config: TelemetryConfig, registry: &DriverRegistry) -> Result<Self> {
        Self::builder(config).build(registry)
    }

    /// Wrap an already constructed driver
    #[must_use]
    pub fn with_driver(config: TelemetryConfig, driver: Box<dyn Driver>) -> Self {
        Self::builder(config).build_with_driver(driver)
    }

    #[must_use]
    pub fn builder(config: TelemetryConfig) -> LoggerBuilder {
        LoggerBuilder::new(config)
    }

    /// Log `message` at `level`.
    ///
    /// Records below the minimum level are dropped without touching the driver.
    /// Caller tags override default tags with the same key. The driver's result is
    /// returned unchanged.
    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        tags: Tags,
        transaction_id: Option<&str>,
    ) -> Result<()> {
        let state = self.state.lock();
        if level < state.config.log_level {
            return Ok(());
        }

        let record = LogRecord::new(level, message, merge_tags(&state.config.default_tags, tags))
            .with_transaction(transaction_id);

        match self.strategy {
            DispatchStrategy::Serialized => {
                let result = self.driver.lock().log(&record);
                drop(state);
                result
            }
            DispatchStrategy::Snapshot => {
                drop(state);
                self.driver.lock().log(&record)
            }
        }
    }

    #[inline]
    pub fn debug(
        &self,
        message: impl Into<String>,
        tags: Tags,
        transaction_id: Option<&str>,
    ) -> Result<()> {
        self.log(LogLevel::Debug, message, tags, transaction_id)
    }

    #[inline]
    pub fn info(
        &self,
        message: impl Into<String>,
        tags: Tags,
        transaction_id: Option<&str>,
    ) -> Result<()> {
        self.log(LogLevel::Info, message, tags, transaction_id)
    }

    #[inline]
    pub fn warning(
        &self,
        message: impl Into<String>,
        tags: Tags,
        transaction_id: Option<&str>,
    ) -> Result<()> {
        self.log(LogLevel::Warning, message, tags, transaction_id)
    }

    #[inline]
    pub fn error(
        &self,
        message: impl Into<String>,
        tags: Tags,
        transaction_id: Option<&str>,
    ) -> Result<()> {
        self.log(LogLevel::Error, message, tags, transaction_id)
    }

    /// Start a transaction and return its id.
    ///
    /// Ids are 128 random bits in hex. If the OS random source is unavailable the
    /// id is the current time in nanoseconds, which is unique only on a best-effort
    /// basis. Never fails.
    pub fn start_transaction(&self) -> String {
        let id = generate_transaction_id();
        self.state.lock().transactions.insert(id.clone());
        id
    }

    /// End an active transaction.
    ///
    /// Fails with `UnknownTransaction` if `id` was never started or has already
    /// ended. Nothing is logged on success.
    pub fn end_transaction(&self, id: &str) -> Result<()> {
        self.state.lock().transactions.end(id).map(|_| ())
    }

    /// Number of transactions started and not yet ended
    pub fn active_transactions(&self) -> usize {
        self.state.lock().transactions.len()
    }

    pub fn is_transaction_active(&self, id: &str) -> bool {
        self.state.lock().transactions.contains(id)
    }

    pub fn set_min_level(&self, level: LogLevel) {
        self.state.lock().config.log_level = level;
    }

    pub fn min_level(&self) -> LogLevel {
        self.state.lock().config.log_level
    }

    /// Add or replace a tag attached to every record
    pub fn add_default_tag(&self, key: impl Into<String>, value: impl Into<String>) {
        self.state
            .lock()
            .config
            .default_tags
            .insert(key.into(), value.into());
    }

    pub fn remove_default_tag(&self, key: &str) {
        self.state.lock().config.default_tags.remove(key);
    }

    /// Copy of the current default tags
    pub fn default_tags(&self) -> Tags {
        self.state.lock().config.default_tags.clone()
    }

    /// Copy of the current configuration
    pub fn config(&self) -> TelemetryConfig {
        self.state.lock().config.clone()
    }

    pub fn strategy(&self) -> DispatchStrategy {
        self.strategy
    }

    /// Close the underlying driver and return its result unchanged
    pub fn close(&self) -> Result<()> {
        self.driver.lock().close()
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use rust_telemetry::prelude::*;
/// use serde_json::json;
///
/// let registry = DriverRegistry::with_builtin_drivers().unwrap();
/// let config = TelemetryConfig::new("console", json!({"colors": false}))
///     .with_log_level(LogLevel::Warning);
///
/// let logger = Logger::builder(config)
///     .dispatch(DispatchStrategy::Snapshot)
///     .build(&registry)
///     .unwrap();
/// assert_eq!(logger.strategy(), DispatchStrategy::Snapshot);
/// ```
pub struct LoggerBuilder {
    config: TelemetryConfig,
    strategy: DispatchStrategy,
}

impl LoggerBuilder {
    pub fn new(config: TelemetryConfig) -> Self {
        Self {
            config,
            strategy: DispatchStrategy::default(),
        }
    }

    /// Choose how driver calls are ordered against other logger operations
    #[must_use = "builder methods return a new value"]
    pub fn dispatch(mut self, strategy: DispatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Resolve the configured driver and build the Logger
    pub fn build(self, registry: &DriverRegistry) -> Result<Logger> {
        let driver = registry
            .resolve(&self.config)
            .map_err(|e| TelemetryError::construction_failed(&self.config.driver, e))?;
        Ok(self.build_with_driver(driver))
    }

    /// Build the Logger around a driver the caller already owns
    pub fn build_with_driver(self, driver: Box<dyn Driver>) -> Logger {
        Logger {
            state: Mutex::new(LoggerState {
                config: self.config,
                transactions: TransactionTable::new(),
            }),
            driver: Mutex::new(driver),
            strategy: self.strategy,
        }
    }
}
