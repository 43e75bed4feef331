//! Request types, one per gateway operation.
//!
//! Every operation is a closed struct (`deny_unknown_fields`) implementing
//! [`Operation`]. The discriminant (`type=sale`, `customer_vault=add_customer`,
//! ...) is part of the operation type, never a caller-settable field.
//!
//! Defaults (currency `USD`, invoice terms `upon_receipt`, unit of measure
//! `NAR`, ...) live in the field types' `Default` impls, so they are applied
//! when the request is built and validators see them as present.

mod call;
mod common;
pub mod customer_vault;
pub mod invoice;
pub mod product;
pub mod query;
pub mod recurring;
pub mod transaction;
mod validate;

use serde::{Serialize, de::DeserializeOwned};

pub use call::{Call, Overrides};
pub use common::{
    AccountHolderType, AccountType, Currency, InitiatedBy, LineItem, PaymentKind, PaymentMethod,
    SecCode, StoredCredentialIndicator, UnitOfMeasure,
};

use crate::{config::Endpoint, error::Result, normalize::ResponseSchema, wire::Discriminant};

/// A gateway operation.
pub trait Operation: Serialize + DeserializeOwned + Send + Sync {
    /// Typed response.
    type Response: ResponseSchema;

    /// Name used in logs and generic messages.
    const NAME: &'static str;

    /// Endpoint the operation is posted to.
    const ENDPOINT: Endpoint;

    /// Literal operation tag, if the gateway expects one.
    const DISCRIMINANT: Option<Discriminant>;

    /// Checks business rules before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::InvalidInput`](crate::error::NmiError::InvalidInput)
    /// naming the failing field or rule.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Declares gateway operations.
///
/// The newtype form wraps a shared request struct so several operations
/// (`sale`, `auth`, `credit`, ...) can reuse one field set. The `impl` form
/// implements [`Operation`] for an existing struct.
macro_rules! gateway_operation {
    (@discriminant $field:literal = $value:literal) => {
        Some($crate::wire::Discriminant::new($field, $value))
    };
    (@discriminant) => {
        None
    };
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty) -> $response:ty {
            name: $op:literal,
            endpoint: $endpoint:ident,
            discriminant: $field:literal = $value:literal,
            validate: $validate:path $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl From<$inner> for $name {
            fn from(request: $inner) -> Self {
                Self(request)
            }
        }

        impl $crate::request::Operation for $name {
            type Response = $response;
            const NAME: &'static str = $op;
            const ENDPOINT: $crate::config::Endpoint = $crate::config::Endpoint::$endpoint;
            const DISCRIMINANT: Option<$crate::wire::Discriminant> =
                Some($crate::wire::Discriminant::new($field, $value));

            fn validate(&self) -> $crate::error::Result<()> {
                $validate(&self.0)
            }
        }
    };
    (
        impl $name:ty => $response:ty {
            name: $op:literal,
            endpoint: $endpoint:ident,
            discriminant: [$($field:literal = $value:literal)?],
            validate: $validate:path $(,)?
        }
    ) => {
        impl $crate::request::Operation for $name {
            type Response = $response;
            const NAME: &'static str = $op;
            const ENDPOINT: $crate::config::Endpoint = $crate::config::Endpoint::$endpoint;
            const DISCRIMINANT: Option<$crate::wire::Discriminant> =
                $crate::request::gateway_operation!(@discriminant $($field = $value)?);

            fn validate(&self) -> $crate::error::Result<()> {
                $validate(self)
            }
        }
    };
}

pub(crate) use gateway_operation;
