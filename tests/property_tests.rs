//! Property-based tests for rust_telemetry using proptest

use parking_lot::Mutex;
use proptest::prelude::*;
use rust_telemetry::prelude::*;
use rust_telemetry::merge_tags;
use serde_json::json;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warning),
        Just(LogLevel::Error),
    ]
}

fn any_tags() -> impl Strategy<Value = Tags> {
    prop::collection::btree_map("[a-z]{1,4}", "[a-z0-9]{0,6}", 0..6)
}

#[derive(Clone, Default)]
struct CaptureDriver(Arc<Mutex<Vec<LogRecord>>>);

impl Driver for CaptureDriver {
    fn log(&mut self, record: &LogRecord) -> Result<()> {
        self.0.lock().push(record.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "capture"
    }
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that LogLevel ordering matches the numeric discriminant
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 < level2, val1 < val2);
        prop_assert_eq!(level1 >= level2, val1 >= val2);
    }

    /// Test that parsing accepts case-insensitive input
    #[test]
    fn test_log_level_case_insensitive(level in any_level(), use_lower in any::<bool>()) {
        let input = if use_lower {
            level.to_str().to_lowercase()
        } else {
            level.to_str().to_string()
        };
        prop_assert_eq!(input.parse::<LogLevel>(), Ok(level));
    }
}

// ============================================================================
// Tag Merge Tests
// ============================================================================

proptest! {
    /// Every caller tag wins, every default without a collision survives
    #[test]
    fn test_merge_caller_wins(defaults in any_tags(), overrides in any_tags()) {
        let merged = merge_tags(&defaults, overrides.clone());

        for (key, value) in &overrides {
            prop_assert_eq!(merged.get(key), Some(value));
        }
        for (key, value) in &defaults {
            if !overrides.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        prop_assert!(merged.keys().all(|k| defaults.contains_key(k) || overrides.contains_key(k)));
    }
}

// ============================================================================
// Filtering Tests
// ============================================================================

proptest! {
    /// The driver sees a record iff its level is at or above the minimum
    #[test]
    fn test_level_filter(minimum in any_level(), levels in prop::collection::vec(any_level(), 0..32)) {
        let driver = CaptureDriver::default();
        let config = TelemetryConfig::new("capture", json!({})).with_log_level(minimum);
        let logger = Logger::with_driver(config, Box::new(driver.clone()));

        for level in &levels {
            logger.log(*level, "sample", Tags::new(), None).unwrap();
        }

        let expected = levels.iter().filter(|level| **level >= minimum).count();
        let delivered = driver.0.lock();
        prop_assert_eq!(delivered.len(), expected);
        prop_assert!(delivered.iter().all(|record| record.level >= minimum));
    }

    /// Records carry exactly the merged tags and the supplied transaction id
    #[test]
    fn test_record_enrichment(
        defaults in any_tags(),
        call_tags in any_tags(),
        transaction in proptest::option::of("[0-9a-f]{32}"),
    ) {
        let driver = CaptureDriver::default();
        let mut config = TelemetryConfig::new("capture", json!({}));
        config.default_tags = defaults.clone();
        let logger = Logger::with_driver(config, Box::new(driver.clone()));

        logger.error("enriched", call_tags.clone(), transaction.as_deref()).unwrap();

        let delivered = driver.0.lock();
        prop_assert_eq!(delivered.len(), 1);
        prop_assert_eq!(&delivered[0].tags, &merge_tags(&defaults, call_tags));
        prop_assert_eq!(&delivered[0].transaction_id, &transaction);
    }
}
