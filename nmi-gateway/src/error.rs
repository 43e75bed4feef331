//! Error types for the NMI gateway client.
//!
//! This module defines all error types that can occur while building, sending
//! or decoding gateway requests. All errors implement the standard
//! [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Local validation** ([`NmiError::InvalidInput`]): caller input rejected before any
//!   network call
//! - **Setup** ([`NmiError::MissingCredential`], [`NmiError::ConfigError`]): construction
//!   time failures
//! - **Network** ([`NmiError::TransportError`], [`NmiError::HttpError`]): the request never
//!   produced a usable response
//! - **Gateway** ([`NmiError::GatewayError`]): the gateway's XML error envelope
//! - **Decoding** ([`NmiError::SchemaMismatch`]): the response fits no known shape
//!
//! Operation clients never return these errors directly. They are folded into
//! [`ApiResponse`](crate::client::ApiResponse) with [`NmiError::status_code`].
//!
//! # Examples
//!
//! ```
//! use nmi_gateway::error::{NmiError, Result};
//!
//! fn require_id(id: &str) -> Result<&str> {
//!     if id.is_empty() {
//!         return Err(NmiError::InvalidInput("customer_vault_id is required".to_owned()));
//!     }
//!     Ok(id)
//! }
//!
//! assert_eq!(require_id("").unwrap_err().status_code(), 400);
//! ```

use thiserror::Error;

/// Result type alias for gateway operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, NmiError>;

/// Maximum number of raw response bytes kept in a [`NmiError::SchemaMismatch`].
pub const RAW_EXCERPT_LIMIT: usize = 512;

/// Errors that can occur while talking to the gateway.
///
/// # Error Recovery
///
/// - **Validation errors** ([`InvalidInput`](Self::InvalidInput)): fix the request and retry
/// - **Network errors** ([`HttpError`](Self::HttpError),
///   [`TransportError`](Self::TransportError)): the caller decides whether to retry; this
///   crate never does
/// - **Gateway errors** ([`GatewayError`](Self::GatewayError)): the gateway rejected the
///   request itself (bad credential, malformed query)
/// - **Decoding errors** ([`SchemaMismatch`](Self::SchemaMismatch)): report with the
///   attached raw excerpt
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum NmiError {
    /// Caller input failed a schema or business-rule check.
    ///
    /// Raised before any network call. Common causes include:
    /// - A required id (`customer_vault_id`, `subscription_id`, ...) is missing
    /// - Both recurrence groups (`day_frequency` and `month_frequency` +
    ///   `day_of_month`) are set, or neither is complete
    /// - A numeric field is outside its documented range
    /// - An override names a field the operation does not know
    ///
    /// # Recovery
    ///
    /// Correct the named field and call again.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No usable security key was supplied.
    ///
    /// Raised when a client is constructed with an empty key, or when the
    /// configured environment variable is unset.
    ///
    /// # Recovery
    ///
    /// Provide the gateway security key, usually through `NMI_SECURITY_KEY`.
    #[error("Missing security key: {0}")]
    MissingCredential(String),

    /// Gateway configuration is invalid.
    ///
    /// Common causes include:
    /// - Non-HTTPS or loopback `base_url`
    /// - Endpoint paths containing traversal sequences
    /// - Unparseable TOML
    #[error("Invalid gateway configuration: {0}")]
    ConfigError(String),

    /// Transport failed to deliver the request or produced a non-2xx status.
    ///
    /// # Recovery
    ///
    /// Inspect the message. The gateway may or may not have processed the
    /// request; query the transaction before resubmitting a sale.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// HTTP request failed.
    ///
    /// This error wraps [`reqwest::Error`]. Common causes include:
    /// - Network timeouts (default: 30 seconds)
    /// - DNS resolution failures
    /// - TLS errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The gateway answered with its XML error envelope.
    ///
    /// The payload is the gateway's own `error_response` text.
    #[error("Gateway error: {0}")]
    GatewayError(String),

    /// The response could not be decoded into the expected shape.
    ///
    /// `raw` holds at most [`RAW_EXCERPT_LIMIT`] bytes of the response body.
    #[error("Unexpected response shape: {reason} (raw: {raw})")]
    SchemaMismatch {
        /// Decoder diagnostic.
        reason: String,
        /// Truncated raw response.
        raw: String,
    },
}

impl NmiError {
    /// Builds a [`SchemaMismatch`](Self::SchemaMismatch) with a truncated excerpt of `raw`.
    pub fn schema_mismatch(reason: impl Into<String>, raw: &str) -> Self {
        Self::SchemaMismatch { reason: reason.into(), raw: excerpt(raw).to_owned() }
    }

    /// HTTP-like status reported by operation clients for this error.
    ///
    /// Local validation failures are 400; everything that happened after the
    /// request was accepted for sending is 500.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            _ => 500,
        }
    }
}

/// Cuts `raw` to at most [`RAW_EXCERPT_LIMIT`] bytes on a char boundary.
pub(crate) fn excerpt(raw: &str) -> &str {
    if raw.len() <= RAW_EXCERPT_LIMIT {
        return raw;
    }
    let mut end = RAW_EXCERPT_LIMIT;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    &raw[..end]
}
