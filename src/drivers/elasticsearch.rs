//! Elasticsearch driver
//!
//! Indexes each record as a document via `POST <host>/<index>/_doc`.
//!
//! Documents carry `level` as the upper-case name (`"INFO"`), the same form the
//! json driver writes. Indices whose mapping types `level` as a number, as
//! produced by senders that post the numeric level, need a new mapping or a
//! separate index.

use crate::core::{Driver, DriverOptions, DriverRegistry, LogRecord, Result, TelemetryError};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

pub const NAME: &str = "elasticsearch";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ElasticsearchOptions {
    host: String,
    index: String,
    username: String,
    password: String,
}

pub fn register(registry: &DriverRegistry) -> Result<()> {
    registry.register(NAME, |options| {
        Ok(Box::new(ElasticsearchDriver::from_options(options)?) as Box<dyn Driver>)
    })
}

#[derive(Debug, Clone)]
struct Credentials {
    username: String,
    password: String,
}

/// Sends every record to an Elasticsearch index over HTTP
///
/// # Example
///
/// ```no_run
/// use rust_telemetry::drivers::ElasticsearchDriver;
///
/// let driver = ElasticsearchDriver::new("http://localhost:9200", "app-logs")
///     .unwrap()
///     .with_basic_auth("elastic", "changeme");
/// ```
pub struct ElasticsearchDriver {
    client: Client,
    url: String,
    credentials: Option<Credentials>,
}

impl ElasticsearchDriver {
    pub fn new(host: &str, index: &str) -> Result<Self> {
        if host.is_empty() || index.is_empty() {
            return Err(TelemetryError::config(NAME, "elasticsearch host and index required"));
        }

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            url: format!("{}/{}/_doc", host.trim_end_matches('/'), index),
            credentials: None,
        })
    }

    /// Authenticate every request with HTTP basic auth
    #[must_use]
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Credentials are only used when both username and password are set.
    fn from_options(options: &DriverOptions) -> Result<Self> {
        let options: ElasticsearchOptions = options.decode()?;
        let driver = Self::new(&options.host, &options.index)?;

        if options.username.is_empty() || options.password.is_empty() {
            Ok(driver)
        } else {
            Ok(driver.with_basic_auth(options.username, options.password))
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Driver for ElasticsearchDriver {
    fn log(&mut self, record: &LogRecord) -> Result<()> {
        let mut request = self.client.post(&self.url).json(record);
        if let Some(ref credentials) = self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TelemetryError::delivery(
                NAME,
                format!("elasticsearch gave non-2xx status: {}", status.as_u16()),
            ));
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        NAME
    }
}
