//! Transport abstraction.
//!
//! A transport delivers one form-encoded POST and hands back the raw body.
//! It knows nothing about operations or response shapes. The crate ships
//! [`HttpTransport`]; tests and embedders may provide their own.
//!
//! # Examples
//!
//! ```rust,no_run
//! use nmi_gateway::{
//!     SecurityKey,
//!     transport::{AuthenticatedRequest, HttpTransport, Transport},
//!     wire::{Discriminant, OperationRequest},
//! };
//!
//! # async fn example() -> nmi_gateway::error::Result<()> {
//! let transport = HttpTransport::new()?;
//! let body = OperationRequest::new(Some(Discriminant::new("type", "validate")))
//!     .field("ccnumber", "4111111111111111")
//!     .field("ccexp", "1025")
//!     .flatten();
//!
//! let request = AuthenticatedRequest::new(body, SecurityKey::new("key")?);
//! let response = transport.post_form("https://secure.nmi.com/api/transact.php", &request).await?;
//! println!("{}", response.body);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;
use std::fmt;

use crate::{
    credential::{SECURITY_KEY_FIELD, SecurityKey},
    error::{NmiError, Result},
    security::redacted_pairs,
    wire::FlatWireRequest,
};

pub mod config;
pub mod http;

pub use config::{HttpConfig, HttpVersion};
pub use http::HttpTransport;

/// Form body content type.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A flattened body paired with the credential it will be sent with.
///
/// The credential is carried separately so it can be placed both in the URL
/// query and in the body, and so [`Debug`](fmt::Debug) output stays redacted.
#[derive(Clone)]
pub struct AuthenticatedRequest {
    body: FlatWireRequest,
    credential: SecurityKey,
}

impl AuthenticatedRequest {
    /// Pairs a body with a credential.
    #[must_use]
    pub fn new(body: FlatWireRequest, credential: SecurityKey) -> Self {
        Self { body, credential }
    }

    /// The flattened body without the credential.
    #[must_use]
    pub fn body(&self) -> &FlatWireRequest {
        &self.body
    }

    /// The credential.
    #[must_use]
    pub fn credential(&self) -> &SecurityKey {
        &self.credential
    }

    /// All wire pairs, credential first.
    #[must_use]
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.body.len() + 1);
        pairs.push((SECURITY_KEY_FIELD.to_owned(), self.credential.expose().to_owned()));
        pairs.extend(self.body.form_pairs());
        pairs
    }

    /// Encodes [`form_pairs`](Self::form_pairs) as `application/x-www-form-urlencoded`.
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::TransportError`] if encoding fails.
    pub fn encode_form(&self) -> Result<String> {
        serde_urlencoded::to_string(self.form_pairs())
            .map_err(|e| NmiError::TransportError(format!("form encoding failed: {e}")))
    }
}

impl fmt::Debug for AuthenticatedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedRequest")
            .field("body", &redacted_pairs(&self.body))
            .field("credential", &self.credential)
            .finish()
    }
}

/// Response from a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response text.
    pub body: String,
}

/// Delivers form-encoded POSTs to the gateway.
///
/// Implementations must:
/// - send `Content-Type: application/x-www-form-urlencoded`
/// - place the credential in the URL query as `security_key` and include
///   [`AuthenticatedRequest::form_pairs`] in the body
/// - return an error for network failures and non-2xx statuses
///
/// Implementations must not retry.
pub trait Transport: Send + Sync {
    /// Posts `request` to `url`.
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be sent or the status is not 2xx.
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        request: &'a AuthenticatedRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Protocol name for logging.
    fn protocol_name(&self) -> &'static str {
        "http"
    }
}
