//! NMI Gateway: a typed client for the NMI payment gateway.
//!
//! The gateway speaks two flat wire formats: form-encoded requests answered
//! with query strings (the transact endpoint) and form-encoded queries
//! answered with XML (the query endpoint). This crate hides both behind
//! typed requests and responses.
//!
//! # Architecture
//!
//! ```text
//! caller
//!   │  typed request (+ overrides)
//! ┌─▼──────────────────────────────────────────────────────┐
//! │ client      Operation clients, one per domain          │
//! │   request   validate: closed field set, business rules │
//! │   wire      flatten: item_*_<n>, merchant_defined_*    │
//! │   transport POST form + security_key                   │
//! │   normalize query string / XML → typed response        │
//! └─┬──────────────────────────────────────────────────────┘
//!   │  ApiResponse { status, data, message }
//! caller
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rust_decimal::Decimal;
//! use nmi_gateway::{
//!     Gateway, SecurityKey,
//!     request::transaction::TransactionRequest,
//! };
//!
//! # async fn example() -> nmi_gateway::Result<()> {
//! let gateway = Gateway::new(SecurityKey::from_env("NMI_SECURITY_KEY")?)?;
//!
//! let response = gateway
//!     .transactions()
//!     .sale(TransactionRequest {
//!         ccnumber: Some("4111111111111111".into()),
//!         ccexp: Some("1025".into()),
//!         amount: Some(Decimal::new(1000, 2)),
//!         ..TransactionRequest::default()
//!     })
//!     .await;
//!
//! println!("{} {}", response.status, response.message);
//! # Ok(())
//! # }
//! ```
//!
//! Per-call overrides are merged over the typed request and checked against
//! the same closed field set:
//!
//! ```rust,no_run
//! use nmi_gateway::{
//!     Gateway, SecurityKey,
//!     request::{Call, Overrides, customer_vault::VaultTransaction},
//! };
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> nmi_gateway::Result<()> {
//! let gateway = Gateway::new(SecurityKey::new("key")?)?;
//! let call = Call::new(VaultTransaction::new("999", Decimal::ONE))
//!     .with_overrides(Overrides::new().set("currency", "EUR"));
//!
//! let response = gateway.customer_vault().sale(call).await;
//! assert!(response.status != 400);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: [`Gateway`] facade and per-domain operation clients
//! - [`request`]: typed requests and their validation rules
//! - [`response`]: typed query-string responses and XML reports
//! - [`wire`]: flattening into the gateway's numbered field convention
//! - [`normalize`]: decoding raw responses, including XML empty-container quirks
//! - [`transport`]: form POST abstraction and the reqwest implementation
//! - [`config`]: TOML configuration
//! - [`credential`]: the security key
//! - [`security`]: redaction of payment data for logs
//! - [`error`]: error types
//!
//! # Status Codes
//!
//! Client methods never return `Err`. Every outcome is an [`ApiResponse`]:
//!
//! | status | meaning |
//! |--------|---------|
//! | 200 | the gateway answered; `data` holds the typed response, possibly a decline |
//! | 400 | the request failed local validation and was not sent |
//! | 500 | transport failure, gateway error envelope, or undecodable response |

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest"
)]

pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod normalize;
pub mod request;
pub mod response;
pub mod security;
pub mod transport;
pub mod wire;

pub use client::{ApiResponse, Gateway};
pub use credential::SecurityKey;
pub use error::{NmiError, Result};
