//! The `[http]` table of the gateway configuration.
//!
//! All traffic goes to one gateway host, so the pool only ever holds
//! connections to that host. Calls are never retried: a timed-out sale may
//! still have been processed, and timeouts are the only way a call is cut
//! short.

use std::{ops::RangeInclusive, time::Duration};

use serde::Deserialize;

use crate::error::{NmiError, Result};

/// Accepted `timeout_secs` values.
pub const TIMEOUT_SECS: RangeInclusive<u64> = 1..=300;
/// Accepted `connect_timeout_secs` values.
pub const CONNECT_TIMEOUT_SECS: RangeInclusive<u64> = 1..=60;

const DEFAULT_POOL_MAX_IDLE: usize = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for [`HttpTransport`](super::HttpTransport).
///
/// ```toml
/// [http]
/// pool_max_idle_per_host = 4
/// timeout_secs = 45
/// http_version = "http1"
/// ```
///
/// Omitted keys take their defaults; unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Idle keep-alive connections kept to the gateway host.
    pub pool_max_idle_per_host: usize,
    /// Whole-request timeout, seconds. See [`TIMEOUT_SECS`].
    pub timeout_secs: u64,
    /// TCP and TLS connect timeout, seconds. See [`CONNECT_TIMEOUT_SECS`].
    pub connect_timeout_secs: u64,
    /// Protocol negotiation.
    pub http_version: HttpVersion,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            http_version: HttpVersion::default(),
        }
    }
}

fn check_secs(field: &str, value: u64, accepted: &RangeInclusive<u64>) -> Result<()> {
    if accepted.contains(&value) {
        return Ok(());
    }
    Err(NmiError::ConfigError(format!(
        "http.{field} must be between {} and {} seconds, got {value}",
        accepted.start(),
        accepted.end()
    )))
}

impl HttpConfig {
    /// Checks both timeouts against their accepted ranges.
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::ConfigError`] naming the first out-of-range key.
    pub fn validate(&self) -> Result<()> {
        check_secs("timeout_secs", self.timeout_secs, &TIMEOUT_SECS)?;
        check_secs("connect_timeout_secs", self.connect_timeout_secs, &CONNECT_TIMEOUT_SECS)
    }

    /// Whole-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// How the transport picks an HTTP version.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HttpVersion {
    /// HTTP/1.1 only.
    Http1,
    /// HTTP/2 with prior knowledge.
    Http2,
    /// Whatever ALPN settles on.
    #[default]
    Auto,
}

impl HttpVersion {
    /// Label recorded as `transport` on request logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Http1 => "http/1.1",
            Self::Http2 => "http/2",
            Self::Auto => "http",
        }
    }
}
