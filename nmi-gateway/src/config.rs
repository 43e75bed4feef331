//! Gateway configuration.
//!
//! This module defines the TOML-deserializable configuration for a gateway
//! connection. Every field has a default, so an empty file is valid.
//!
//! ```toml
//! base_url = "https://secure.nmi.com"
//! transact_path = "/api/transact.php"
//! query_path = "/api/query.php"
//! security_key_env = "NMI_SECURITY_KEY"
//!
//! [http]
//! timeout_secs = 45
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::{
    credential::SecurityKey,
    error::{NmiError, Result},
    transport::HttpConfig,
};

/// Production gateway host.
pub const DEFAULT_BASE_URL: &str = "https://secure.nmi.com";
/// Transactional endpoint path.
pub const DEFAULT_TRANSACT_PATH: &str = "/api/transact.php";
/// Reporting endpoint path.
pub const DEFAULT_QUERY_PATH: &str = "/api/query.php";
/// Environment variable holding the security key.
pub const DEFAULT_SECURITY_KEY_ENV: &str = "NMI_SECURITY_KEY";

/// The two gateway endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Transactions, vault, recurring, invoicing and products. Query-string responses.
    Transact,
    /// Reporting. XML responses.
    Query,
}

/// Root gateway configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Gateway base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the transactional endpoint.
    #[serde(default = "default_transact_path")]
    pub transact_path: String,

    /// Path of the reporting endpoint.
    #[serde(default = "default_query_path")]
    pub query_path: String,

    /// Environment variable the security key is read from.
    #[serde(default = "default_security_key_env")]
    pub security_key_env: String,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            transact_path: default_transact_path(),
            query_path: default_query_path(),
            security_key_env: default_security_key_env(),
            http: HttpConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::ConfigError`] if the document is malformed or invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use nmi_gateway::config::GatewayConfig;
    ///
    /// let config = GatewayConfig::from_toml_str("[http]\ntimeout_secs = 10").unwrap();
    /// assert_eq!(config.transact_url(), "https://secure.nmi.com/api/transact.php");
    /// ```
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml)
            .map_err(|e| NmiError::ConfigError(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::ConfigError`] if the file cannot be read or is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            NmiError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validates the configuration.
    ///
    /// Checks that:
    /// - `base_url` is HTTPS and not a loopback address
    /// - endpoint paths start with `/` and contain no traversal sequences
    /// - `security_key_env` is a valid environment variable name
    /// - HTTP timeouts are within range
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::ConfigError`] describing the first failing check.
    pub fn validate(&self) -> Result<()> {
        validate_base_url(&self.base_url)?;
        validate_endpoint_path("transact_path", &self.transact_path)?;
        validate_endpoint_path("query_path", &self.query_path)?;
        validate_env_var_name(&self.security_key_env)?;
        self.http.validate()
    }

    /// Reads the security key from [`security_key_env`](Self::security_key_env).
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::MissingCredential`] if the variable is unset or empty.
    pub fn security_key(&self) -> Result<SecurityKey> {
        SecurityKey::from_env(&self.security_key_env)
    }

    /// Full URL of `endpoint`.
    #[must_use]
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        let path = match endpoint {
            Endpoint::Transact => &self.transact_path,
            Endpoint::Query => &self.query_path,
        };
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Full URL of the transactional endpoint.
    #[must_use]
    pub fn transact_url(&self) -> String {
        self.endpoint_url(Endpoint::Transact)
    }

    /// Full URL of the reporting endpoint.
    #[must_use]
    pub fn query_url(&self) -> String {
        self.endpoint_url(Endpoint::Query)
    }
}

fn validate_base_url(base_url: &str) -> Result<()> {
    let url = Url::parse(base_url)
        .map_err(|e| NmiError::ConfigError(format!("invalid base_url '{base_url}': {e}")))?;

    if url.scheme() != "https" {
        return Err(NmiError::ConfigError(format!(
            "base_url must use HTTPS, got: {}",
            url.scheme()
        )));
    }

    if let Some(host) = url.host_str() {
        let host_lower = host.to_lowercase();
        if host_lower == "localhost"
            || host_lower == "::1"
            || host_lower == "[::1]"
            || host_lower.starts_with("127.")
        {
            return Err(NmiError::ConfigError(format!(
                "base_url must not be localhost or loopback: {host}"
            )));
        }
    }

    Ok(())
}

/// Validates an endpoint path for traversal and shape.
fn validate_endpoint_path(name: &str, path: &str) -> Result<()> {
    if path.contains("..") {
        return Err(NmiError::ConfigError(format!(
            "{name} contains path traversal sequence '..': {path}"
        )));
    }

    if path.contains("//") {
        return Err(NmiError::ConfigError(format!("{name} contains double slash '//': {path}")));
    }

    if !path.starts_with('/') {
        return Err(NmiError::ConfigError(format!("{name} must start with '/': {path}")));
    }

    Ok(())
}

/// Validates an environment variable name.
fn validate_env_var_name(name: &str) -> Result<()> {
    let Some(first_char) = name.chars().next() else {
        return Err(NmiError::ConfigError("environment variable name cannot be empty".to_owned()));
    };

    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(NmiError::ConfigError(format!(
            "environment variable name must start with letter or underscore: {name}"
        )));
    }

    if let Some(ch) = name.chars().find(|ch| !ch.is_ascii_alphanumeric() && *ch != '_') {
        return Err(NmiError::ConfigError(format!(
            "environment variable name contains invalid character '{ch}': {name}"
        )));
    }

    Ok(())
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_transact_path() -> String {
    DEFAULT_TRANSACT_PATH.to_owned()
}

fn default_query_path() -> String {
    DEFAULT_QUERY_PATH.to_owned()
}

fn default_security_key_env() -> String {
    DEFAULT_SECURITY_KEY_ENV.to_owned()
}
