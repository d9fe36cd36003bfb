//! Driver registry: maps driver names to their constructors
//!
//! A registry is built once at startup, populated by each driver's `register`
//! function, and then passed by reference to whatever constructs loggers.
//! Tests build their own isolated registries.

use super::{
    config::TelemetryConfig,
    driver::{Driver, DriverConstructor, DriverOptions},
    error::{Result, TelemetryError},
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Default)]
pub struct DriverRegistry {
    constructors: RwLock<HashMap<String, DriverConstructor>>,
}

impl DriverRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every driver compiled into this crate
    pub fn with_builtin_drivers() -> Result<Self> {
        let registry = Self::new();
        crate::drivers::register_builtin(&registry)?;
        Ok(registry)
    }

    /// Register a constructor under `name`.
    ///
    /// Fails with `DuplicateDriver` if the name is taken; the existing entry is kept.
    pub fn register<F>(&self, name: impl Into<String>, constructor: F) -> Result<()>
    where
        F: Fn(&DriverOptions) -> Result<Box<dyn Driver>> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut constructors = self.constructors.write();
        if constructors.contains_key(&name) {
            return Err(TelemetryError::duplicate_driver(name));
        }
        constructors.insert(name, Arc::new(constructor));
        Ok(())
    }

    /// Names of all registered drivers, sorted
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.read().contains_key(name)
    }

    /// Build the driver named by `config.driver` from `config.driver_config`.
    ///
    /// Constructor errors are returned as-is.
    pub fn resolve(&self, config: &TelemetryConfig) -> Result<Box<dyn Driver>> {
        // Clone the handle so the constructor runs without the table lock held.
        let constructor = self
            .constructors
            .read()
            .get(&config.driver)
            .cloned()
            .ok_or_else(|| TelemetryError::unknown_driver(&config.driver))?;

        constructor(&config.driver_config)
    }
}

impl fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("drivers", &self.registered_names())
            .finish()
    }
}
