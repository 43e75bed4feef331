//! Operation clients and the [`Gateway`] facade.
//!
//! Every client method returns an [`ApiResponse`] rather than a `Result`:
//! local validation failures, transport failures and gateway errors are all
//! folded into its `status` and `message`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use nmi_gateway::{
//!     Gateway, SecurityKey,
//!     request::customer_vault::{AddCustomer, CustomerRecord},
//! };
//!
//! # async fn example() -> nmi_gateway::error::Result<()> {
//! let gateway = Gateway::new(SecurityKey::new("my-security-key")?)?;
//!
//! let response = gateway
//!     .customer_vault()
//!     .add_customer(CustomerRecord {
//!         ccnumber: Some("4111111111111111".into()),
//!         ccexp: Some("1025".into()),
//!         ..CustomerRecord::default()
//!     })
//!     .await;
//!
//! if let Some(data) = &response.data {
//!     println!("stored as {:?}", data.customer_vault_id);
//! }
//! # Ok(())
//! # }
//! ```

mod customer_vault;
mod dispatch;
mod invoices;
mod products;
mod query;
mod recurring;
mod response;
mod transactions;

use std::{fmt, sync::Arc};

pub use customer_vault::CustomerVault;
pub(crate) use dispatch::Dispatcher;
pub use invoices::Invoices;
pub use products::Products;
pub use query::Query;
pub use recurring::Recurring;
pub use response::ApiResponse;
pub use transactions::Transactions;

use crate::{
    config::GatewayConfig,
    credential::SecurityKey,
    error::Result,
    transport::{HttpTransport, Transport},
};

/// Declares a domain client sharing the gateway's dispatcher.
macro_rules! operation_client {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<T = $crate::transport::HttpTransport> {
            dispatcher: std::sync::Arc<$crate::client::Dispatcher<T>>,
        }

        impl<T> $name<T> {
            pub(crate) fn new(dispatcher: std::sync::Arc<$crate::client::Dispatcher<T>>) -> Self {
                Self { dispatcher }
            }
        }

        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                Self { dispatcher: std::sync::Arc::clone(&self.dispatcher) }
            }
        }

        impl<T> std::fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name)).field("dispatcher", &self.dispatcher).finish()
            }
        }
    };
}

pub(crate) use operation_client;

/// Entry point: one credential, one client per gateway domain.
///
/// Cloning is cheap; all clones share one transport.
pub struct Gateway<T = HttpTransport> {
    dispatcher: Arc<Dispatcher<T>>,
}

impl<T> Clone for Gateway<T> {
    fn clone(&self) -> Self {
        Self { dispatcher: Arc::clone(&self.dispatcher) }
    }
}

impl<T> fmt::Debug for Gateway<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway").field("dispatcher", &self.dispatcher).finish()
    }
}

impl Gateway<HttpTransport> {
    /// Connects to the production gateway with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(security_key: SecurityKey) -> Result<Self> {
        Self::from_config(&GatewayConfig::default(), security_key)
    }

    /// Connects using `config`.
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::ConfigError`](crate::error::NmiError::ConfigError)
    /// if `config` is invalid, or an HTTP error if the client cannot be built.
    pub fn from_config(config: &GatewayConfig, security_key: SecurityKey) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_config(&config.http)?;
        Ok(Self::with_transport(security_key, transport, config))
    }

    /// Connects using `config`, reading the key from its environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::MissingCredential`](crate::error::NmiError::MissingCredential)
    /// if the variable is unset, or any error of [`Gateway::from_config`].
    pub fn from_env(config: &GatewayConfig) -> Result<Self> {
        let security_key = config.security_key()?;
        Self::from_config(config, security_key)
    }
}

impl<T: Transport> Gateway<T> {
    /// Builds a gateway over a custom transport.
    ///
    /// `config` supplies the endpoint URLs; its HTTP settings are not used.
    pub fn with_transport(security_key: SecurityKey, transport: T, config: &GatewayConfig) -> Self {
        Self { dispatcher: Arc::new(Dispatcher::new(security_key, transport, config)) }
    }

    /// Sales, authorizations, captures, refunds and the rest of `type=...`.
    #[must_use]
    pub fn transactions(&self) -> Transactions<T> {
        Transactions::new(Arc::clone(&self.dispatcher))
    }

    /// Customer vault.
    #[must_use]
    pub fn customer_vault(&self) -> CustomerVault<T> {
        CustomerVault::new(Arc::clone(&self.dispatcher))
    }

    /// Recurring plans and subscriptions.
    #[must_use]
    pub fn recurring(&self) -> Recurring<T> {
        Recurring::new(Arc::clone(&self.dispatcher))
    }

    /// Invoicing.
    #[must_use]
    pub fn invoices(&self) -> Invoices<T> {
        Invoices::new(Arc::clone(&self.dispatcher))
    }

    /// Product catalog.
    #[must_use]
    pub fn products(&self) -> Products<T> {
        Products::new(Arc::clone(&self.dispatcher))
    }

    /// Reporting queries.
    #[must_use]
    pub fn query(&self) -> Query<T> {
        Query::new(Arc::clone(&self.dispatcher))
    }
}
