//! End-to-end telemetry demo
//!
//! Loads a configuration file, builds a logger from the built-in drivers and
//! logs a short transaction.
//!
//! Run with: cargo run --example telemetry_demo -- path/to/config.json
//!
//! A minimal config for the console driver:
//!
//! ```json
//! {"driver": "console", "driver_config": {}, "log_level": 0, "default_tags": {"app": "demo"}}
//! ```

use rust_telemetry::prelude::*;
use rust_telemetry::tags;
use std::process::ExitCode;

fn run(config_path: &str) -> Result<()> {
    let config = TelemetryConfig::load(config_path)?;
    let registry = DriverRegistry::with_builtin_drivers()?;

    println!("Registered drivers:");
    for name in registry.registered_names() {
        println!("  {}", name);
    }

    let logger = Logger::new(config, &registry)?;
    let transaction_id = logger.start_transaction();

    logger.debug(
        "This is a debug message",
        tags! { "CPU" => "CPU usage is at 69%" },
        Some(&transaction_id),
    )?;
    logger.info(
        "This is an info message",
        tags! { "CPU" => "CPU usage is at 69%" },
        Some(&transaction_id),
    )?;
    logger.warning(
        "This is a warning message",
        tags! { "CPU" => "CPU usage is at 69%" },
        None,
    )?;

    logger.end_transaction(&transaction_id)?;
    logger.close()
}

fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());

    match run(&config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("telemetry demo failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
