//! Gateway security key.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::{NmiError, Result};

/// Canonical wire name of the credential field.
pub const SECURITY_KEY_FIELD: &str = "security_key";

/// The merchant's gateway security key.
///
/// Held as an immutable value by every operation client. The backing buffer
/// is wiped on drop and [`Debug`] never prints the key.
///
/// # Examples
///
/// ```
/// use nmi_gateway::SecurityKey;
///
/// let key = SecurityKey::new("6457Thfj624V5r7WUwc5v6a68Zsd6YEm").unwrap();
/// assert_eq!(format!("{key:?}"), "SecurityKey(***)");
/// assert!(SecurityKey::new("  ").is_err());
/// ```
#[derive(Clone)]
pub struct SecurityKey(Zeroizing<String>);

impl SecurityKey {
    /// Wraps a security key.
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::MissingCredential`] if `key` is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = Zeroizing::new(key.into());
        if key.trim().is_empty() {
            return Err(NmiError::MissingCredential("security key is empty".to_owned()));
        }
        Ok(Self(key))
    }

    /// Reads the key from the environment variable `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::MissingCredential`] if the variable is unset or empty.
    pub fn from_env(name: &str) -> Result<Self> {
        let value = std::env::var(name).map_err(|_| {
            NmiError::MissingCredential(format!("environment variable {name} is not set"))
        })?;
        Self::new(value)
    }

    /// Exposes the secret for placement on the wire.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecurityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecurityKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(SecurityKey::new(""), Err(NmiError::MissingCredential(_))));
        assert!(matches!(SecurityKey::new("\t\n"), Err(NmiError::MissingCredential(_))));
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = SecurityKey::new("secret-value").unwrap();
        let printed = format!("{key:?}");
        assert!(!printed.contains("secret-value"));
        assert_eq!(key.expose(), "secret-value");
    }

    #[test]
    fn test_from_env_missing() {
        let result = SecurityKey::from_env("NMI_GATEWAY_TEST_KEY_THAT_IS_NEVER_SET");
        assert!(matches!(result, Err(NmiError::MissingCredential(_))));
    }
}
