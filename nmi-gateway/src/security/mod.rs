//! Log hygiene for payment data.
//!
//! Wire bodies carry card numbers, bank account details and the gateway
//! security key. Anything that reaches `tracing` or a `Debug` impl goes
//! through [`redacted_pairs`] first:
//!
//! ```rust
//! use nmi_gateway::{security::redacted_pairs, wire::OperationRequest};
//!
//! let body = OperationRequest::new(None)
//!     .field("ccnumber", "4111111111111111")
//!     .field("cvv", "999")
//!     .field("amount", "5.00")
//!     .flatten();
//!
//! let pairs = redacted_pairs(&body);
//! assert_eq!(pairs[0].1, "************1111");
//! assert_eq!(pairs[1].1, "***");
//! assert_eq!(pairs[2].1, "5.00");
//! ```

mod redact;

pub use redact::{SENSITIVE_FIELDS, is_sensitive, redact_value, redacted_pairs};
