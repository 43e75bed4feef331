//! Typed gateway responses.
//!
//! [`form`] holds the query-string replies of the transact endpoint,
//! [`report`] the XML reports of the query endpoint. Both implement
//! [`ResponseSchema`](crate::normalize::ResponseSchema) so the normalizer knows
//! how to decode them.

pub mod form;
pub mod report;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use form::{
    CustomerVaultResponse, InvoiceResponse, ProductResponse, RecurringResponse,
    TransactionResponse,
};
pub use report::{
    CustomerVaultReport, GatewayProcessorsReport, InvoiceReport, ProfileReport, Receipt,
    RecurringPlansReport, RecurringReport, TestModeReport, TransactionReport,
};

/// Outcome code of a transact-endpoint call.
///
/// A declined or errored call is still a well-formed response; check this
/// code, not the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseCode {
    /// Approved.
    #[serde(rename = "1")]
    Approved,
    /// Declined.
    #[serde(rename = "2")]
    Declined,
    /// Error in transaction data or system error.
    #[serde(rename = "3")]
    Error,
}

impl ResponseCode {
    /// Returns `true` for [`ResponseCode::Approved`].
    #[must_use]
    pub const fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "1",
            Self::Declined => "2",
            Self::Error => "3",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
