//! Per-call overrides.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::error::{NmiError, Result};

/// Raw field values merged over a typed request.
///
/// Overrides win over the request's own values. They are checked against the
/// operation's closed field set, so an unknown name fails validation.
///
/// # Examples
///
/// ```
/// use nmi_gateway::request::Overrides;
///
/// let overrides = Overrides::new().set("currency", "EUR").set("customer_receipt", true);
/// assert_eq!(overrides.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides(Map<String, Value>);

impl Overrides {
    /// Creates an empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one field.
    #[must_use]
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Builds overrides from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::InvalidInput`] if `value` is not an object.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(NmiError::InvalidInput(format!("overrides must be an object, got {other}"))),
        }
    }

    /// Number of overridden fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges the overrides over `request` and re-reads the result as `R`.
    fn apply<R: Serialize + DeserializeOwned>(self, request: R) -> Result<R> {
        if self.is_empty() {
            return Ok(request);
        }

        let mut merged = match serde_json::to_value(&request) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(NmiError::InvalidInput("request must serialize to an object".to_owned()));
            }
            Err(e) => return Err(NmiError::InvalidInput(format!("cannot serialize request: {e}"))),
        };
        merged.extend(self.0);

        serde_json::from_value(Value::Object(merged))
            .map_err(|e| NmiError::InvalidInput(format!("invalid override: {e}")))
    }
}

/// One operation invocation: the typed request plus optional overrides.
///
/// Client methods accept `impl Into<Call<R>>`, so a bare request works too.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Call<R> {
    request: R,
    overrides: Overrides,
}

impl<R> Call<R> {
    /// Wraps a request with no overrides.
    pub fn new(request: R) -> Self {
        Self { request, overrides: Overrides::new() }
    }

    /// Attaches overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// The typed request.
    pub fn request(&self) -> &R {
        &self.request
    }

    /// Converts the request, keeping the overrides.
    pub fn map<U>(self, f: impl FnOnce(R) -> U) -> Call<U> {
        Call { request: f(self.request), overrides: self.overrides }
    }

    /// Applies the overrides, yielding the final request.
    pub(crate) fn resolve(self) -> Result<R>
    where
        R: Serialize + DeserializeOwned,
    {
        self.overrides.apply(self.request)
    }
}

impl<R> From<R> for Call<R> {
    fn from(request: R) -> Self {
        Self::new(request)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Sample {
        amount: Option<String>,
        currency: String,
    }

    #[test]
    fn test_overrides_win() {
        let call = Call::new(Sample { amount: Some("1.00".into()), currency: "USD".into() })
            .with_overrides(Overrides::new().set("currency", "EUR"));
        let resolved = call.resolve().unwrap();
        assert_eq!(resolved.currency, "EUR");
        assert_eq!(resolved.amount.as_deref(), Some("1.00"));
    }

    #[test]
    fn test_unknown_override_rejected() {
        let call = Call::new(Sample::default()).with_overrides(Overrides::new().set("securityKey", "x"));
        assert!(matches!(call.resolve(), Err(NmiError::InvalidInput(msg)) if msg.contains("securityKey")));
    }

    #[test]
    fn test_override_can_clear_optional() {
        let call = Call::new(Sample { amount: Some("1.00".into()), ..Sample::default() })
            .with_overrides(Overrides::new().set("amount", Value::Null));
        assert_eq!(call.resolve().unwrap().amount, None);
    }

    #[test]
    fn test_from_json_requires_object() {
        assert!(Overrides::from_json(json!(["a"])).is_err());
        assert_eq!(Overrides::from_json(json!({"a": 1})).unwrap().len(), 1);
    }
}
