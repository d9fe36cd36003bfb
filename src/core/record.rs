//! Log record handed to drivers

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag set attached to a record. Ordered so drivers render tags deterministically.
pub type Tags = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub tags: Tags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: impl Into<String>, tags: Tags) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            tags,
            transaction_id: None,
        }
    }

    pub fn with_transaction(mut self, transaction_id: Option<&str>) -> Self {
        self.transaction_id = transaction_id.map(str::to_owned);
        self
    }

    /// Format tags as space-separated key=value pairs
    pub fn format_tags(&self) -> String {
        self.tags
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Message with line breaks escaped, for line-oriented drivers.
    ///
    /// A raw newline would let a caller forge additional entries in a text log.
    pub fn sanitized_message(&self) -> String {
        self.message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }
}

/// Overlay `overrides` on top of `defaults`; on key collision the override wins.
pub fn merge_tags(defaults: &Tags, overrides: Tags) -> Tags {
    let mut merged = defaults.clone();
    merged.extend(overrides);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_merge_caller_overrides_default() {
        let defaults = tags(&[("env", "prod")]);
        let merged = merge_tags(&defaults, tags(&[("env", "dev"), ("region", "us")]));
        assert_eq!(merged, tags(&[("env", "dev"), ("region", "us")]));
    }

    #[test]
    fn test_merge_empty_yields_empty_map() {
        let merged = merge_tags(&Tags::new(), Tags::new());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_format_tags_is_sorted() {
        let record = LogRecord::new(LogLevel::Info, "msg", tags(&[("b", "2"), ("a", "1")]));
        assert_eq!(record.format_tags(), "a=1 b=2");
    }

    #[test]
    fn test_sanitized_message() {
        let record = LogRecord::new(LogLevel::Info, "line one\nline two", Tags::new());
        assert_eq!(record.sanitized_message(), "line one\\nline two");
        assert_eq!(record.message, "line one\nline two");
    }

    #[test]
    fn test_transaction_id_skipped_when_absent() {
        let record = LogRecord::new(LogLevel::Debug, "msg", Tags::new());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("transaction_id").is_none());

        let record = record.with_transaction(Some("abc"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["transaction_id"], "abc");
    }
}
