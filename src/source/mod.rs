//! HTTP client for the remote experiments endpoint.
//!
//! Issues a single `GET <api_base_url>/api/experiments` with the synchronous
//! `ureq` client. No headers, query parameters or body are sent, and there is
//! no retry or timeout: the caller decides what to do with a failure.
//!
//! The [`RecordSource`] trait is the seam between the application shell and
//! the network, so sessions can be driven from in-memory data in tests.

use std::time::Duration;

use thiserror::Error;

use crate::config::schema::SourceConfig;
use crate::record::Record;

/// Path of the experiments collection, relative to the API base URL.
pub const EXPERIMENTS_PATH: &str = "/api/experiments";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The only failure class of the explorer: the fetch did not yield records.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS or TLS failure before a response arrived.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body was not a JSON array of records.
    #[error("failed to parse experiments from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Anything that can produce the record list once.
pub trait RecordSource: Send + 'static {
    fn fetch(&self) -> Result<Vec<Record>, FetchError>;

    /// Human-readable origin of the records, for logs and health output.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// Synchronous client for the experiments endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
}

impl HttpSource {
    /// Build a client from the resolved `[source]` config.
    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(&config.api_base_url)
    }

    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full URL of the experiments endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, EXPERIMENTS_PATH)
    }

    /// Check whether the endpoint answers at all.
    ///
    /// Any HTTP response, even an error status, counts as reachable. Only
    /// this probe has a timeout; the record fetch itself waits indefinitely.
    pub fn is_reachable(&self) -> bool {
        let result = ureq::get(&self.endpoint())
            .timeout(Duration::from_secs(5))
            .call();
        match result {
            Ok(_) | Err(ureq::Error::Status(_, _)) => true,
            Err(ureq::Error::Transport(_)) => false,
        }
    }
}

impl RecordSource for HttpSource {
    fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        let url = self.endpoint();
        tracing::debug!(%url, "fetching experiments");

        let resp = ureq::get(&url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => FetchError::Status {
                url: url.clone(),
                status,
            },
            ureq::Error::Transport(t) => FetchError::Transport {
                url: url.clone(),
                message: t.to_string(),
            },
        })?;

        let records: Vec<Record> = resp
            .into_json()
            .map_err(|source| FetchError::Body {
                url: url.clone(),
                source,
            })?;

        tracing::info!(%url, count = records.len(), "experiments loaded");
        Ok(records)
    }

    fn describe(&self) -> String {
        self.endpoint()
    }
}

/// A fixed in-memory record list. Used for tests and offline demos.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<Record>,
}

impl StaticSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl RecordSource for StaticSource {
    fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory records", self.records.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
