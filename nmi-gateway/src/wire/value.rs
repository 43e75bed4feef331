//! Scalar values carried on the wire.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::Value;

use crate::error::{NmiError, Result};

/// A single form-body scalar.
///
/// Values stay typed until the transport boundary, where [`Display`](fmt::Display)
/// renders them: decimals in plain notation, booleans as `true`/`false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    /// Free text.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Monetary or fractional amount.
    Decimal(Decimal),
    /// Flag.
    Bool(bool),
}

impl WireValue {
    /// Converts a JSON scalar. `null` maps to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::InvalidInput`] for arrays, objects, or numbers that
    /// do not fit a decimal.
    pub fn from_json(name: &str, value: Value) -> Result<Option<Self>> {
        let scalar = match value {
            Value::Null => return Ok(None),
            Value::Bool(b) => Self::Bool(b),
            Value::String(s) => Self::Text(s),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Decimal(Decimal::from(u))
                } else {
                    let f = n.as_f64().unwrap_or(f64::NAN);
                    Self::Decimal(Decimal::try_from(f).map_err(|e| {
                        NmiError::InvalidInput(format!("field '{name}' is not a valid amount: {e}"))
                    })?)
                }
            }
            Value::Array(_) | Value::Object(_) => {
                return Err(NmiError::InvalidInput(format!(
                    "field '{name}' must be a scalar value"
                )));
            }
        };
        Ok(Some(scalar))
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for WireValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for WireValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<Decimal> for WireValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl Serialize for WireValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Decimal(d) => Serialize::serialize(d, serializer),
            Self::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl<'de> Deserialize<'de> for WireValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ScalarVisitor;

        impl de::Visitor<'_> for ScalarVisitor {
            type Value = WireValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                Ok(WireValue::Text(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
                Ok(WireValue::Text(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
                Ok(WireValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                Ok(WireValue::Integer(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                Ok(i64::try_from(v).map_or_else(|_| WireValue::Decimal(v.into()), WireValue::Integer))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
                Decimal::try_from(v).map(WireValue::Decimal).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;
    use crate::wire::CustomFieldMap;

    #[test]
    fn test_decimal_never_scientific() {
        let tiny = WireValue::Decimal(Decimal::from_str("0.00000001").unwrap());
        assert_eq!(tiny.to_string(), "0.00000001");

        let large = WireValue::from_json("amount", json!(1e15)).unwrap().unwrap();
        assert_eq!(large.to_string(), "1000000000000000");
    }

    #[test]
    fn test_bool_renders_literal() {
        assert_eq!(WireValue::Bool(true).to_string(), "true");
        assert_eq!(WireValue::Bool(false).to_string(), "false");
    }

    #[test]
    fn test_from_json_null_is_absent() {
        assert_eq!(WireValue::from_json("x", Value::Null).unwrap(), None);
    }

    #[test]
    fn test_from_json_rejects_nested() {
        assert!(WireValue::from_json("x", json!([1])).is_err());
        assert!(WireValue::from_json("x", json!({"a": 1})).is_err());
    }

    #[test]
    fn test_decimal_serializes_as_plain_text() {
        let amount = WireValue::Decimal(Decimal::new(1000, 2));
        assert_eq!(serde_json::to_value(&amount).unwrap(), json!("10.00"));

        let custom: CustomFieldMap = [("rate", Decimal::new(125, 3))].into_iter().collect();
        assert_eq!(serde_json::to_value(&custom).unwrap(), json!({ "rate": "0.125" }));
    }
}
