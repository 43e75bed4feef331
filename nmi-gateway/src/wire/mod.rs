//! Wire model for gateway requests.
//!
//! The gateway only understands flat `key=value` form bodies. Requests are
//! described here as an [`OperationRequest`] (discriminant, scalar fields,
//! line items, custom fields) and reduced to a [`FlatWireRequest`] by
//! [`flatten`].
//!
//! # Examples
//!
//! ```
//! use nmi_gateway::wire::{CustomFieldMap, LineItemRecord, OperationRequest};
//!
//! let mut custom = CustomFieldMap::new();
//! custom.insert("loyalty_tier", "gold");
//!
//! let flat = OperationRequest::new(None)
//!     .field("amount", 10)
//!     .line_items(vec![LineItemRecord::new().with("sku", "A").with("qty", 1)])
//!     .custom_fields(custom)
//!     .flatten();
//!
//! assert_eq!(flat.get("sku_1").map(ToString::to_string).as_deref(), Some("A"));
//! assert_eq!(
//!     flat.get("merchant_defined_field_1").map(ToString::to_string).as_deref(),
//!     Some("gold")
//! );
//! ```

mod flatten;
mod value;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser::SerializeMap};
use serde_json::Value;

pub use flatten::{MERCHANT_DEFINED_FIELD_PREFIX, flatten};
pub use value::WireValue;

use crate::{
    error::{NmiError, Result},
    request::Operation,
};

/// Request key holding the line-item list before flattening.
pub const LINE_ITEMS_FIELD: &str = "products";

/// Request key holding the custom-field map before flattening.
pub const CUSTOM_FIELDS_FIELD: &str = "custom_fields";

/// Literal field identifying the gateway operation, e.g. `customer_vault=add_customer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discriminant {
    /// Wire field name.
    pub field: &'static str,
    /// Literal value.
    pub value: &'static str,
}

impl Discriminant {
    /// Creates a discriminant.
    #[must_use]
    pub const fn new(field: &'static str, value: &'static str) -> Self {
        Self { field, value }
    }
}

/// One line item: ordered named scalars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItemRecord(Vec<(String, WireValue)>);

impl LineItemRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<WireValue>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    /// Number of present fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WireValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl IntoIterator for LineItemRecord {
    type Item = (String, WireValue);
    type IntoIter = std::vec::IntoIter<(String, WireValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<WireValue>> FromIterator<(K, V)> for LineItemRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Ordered sequence of line items; position `i` flattens to suffix `_{i+1}`.
pub type LineItemList = Vec<LineItemRecord>;

/// Caller-keyed custom fields, kept in insertion order.
///
/// Keys are only used for de-duplication: on the wire the `n`-th entry
/// becomes `merchant_defined_field_n`. The gateway accepts at most 20 entries
/// but no limit is enforced here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFieldMap(Vec<(String, WireValue)>);

impl CustomFieldMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<WireValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Looks up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WireValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consumes the map, yielding values in insertion order.
    pub fn into_values(self) -> impl Iterator<Item = WireValue> {
        self.0.into_iter().map(|(_, v)| v)
    }
}

impl<K: Into<String>, V: Into<WireValue>> FromIterator<(K, V)> for CustomFieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for CustomFieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CustomFieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> de::Visitor<'de> for OrderedVisitor {
            type Value = CustomFieldMap;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of custom field names to scalar values")
            }

            fn visit_map<A: de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut map = CustomFieldMap::new();
                while let Some((key, value)) = access.next_entry::<String, WireValue>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// A structured request before flattening.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationRequest {
    discriminant: Option<Discriminant>,
    fields: Vec<(String, WireValue)>,
    line_items: LineItemList,
    custom_fields: CustomFieldMap,
}

impl OperationRequest {
    /// Starts a request for the given operation.
    #[must_use]
    pub fn new(discriminant: Option<Discriminant>) -> Self {
        Self { discriminant, ..Self::default() }
    }

    /// Adds a scalar field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<WireValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Sets the line items.
    #[must_use]
    pub fn line_items(mut self, items: LineItemList) -> Self {
        self.line_items = items;
        self
    }

    /// Sets the custom fields.
    #[must_use]
    pub fn custom_fields(mut self, fields: CustomFieldMap) -> Self {
        self.custom_fields = fields;
        self
    }

    /// Splits a serialized request object into its wire parts.
    ///
    /// `products` becomes the line-item list and `custom_fields` the custom
    /// field map. Arrays of scalars are joined with `,`. Nulls are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::InvalidInput`] if `value` is not an object or holds
    /// nested values the wire format cannot carry.
    pub fn from_serialized(discriminant: Option<Discriminant>, value: Value) -> Result<Self> {
        let Value::Object(object) = value else {
            return Err(NmiError::InvalidInput("request must serialize to an object".to_owned()));
        };

        let mut request = Self::new(discriminant);
        for (name, value) in object {
            match name.as_str() {
                LINE_ITEMS_FIELD => request.line_items = line_items_from(value)?,
                CUSTOM_FIELDS_FIELD => request.custom_fields = custom_fields_from(value)?,
                _ => {
                    if let Some(value) = scalar_from(&name, value)? {
                        request.fields.push((name, value));
                    }
                }
            }
        }
        Ok(request)
    }

    /// Serializes `operation` and splits it under its discriminant.
    ///
    /// # Errors
    ///
    /// Returns [`NmiError::InvalidInput`] if the operation cannot be
    /// serialized or carries values the wire format cannot hold.
    pub fn from_operation<O: Operation>(operation: &O) -> Result<Self> {
        let value = serde_json::to_value(operation)
            .map_err(|e| NmiError::InvalidInput(format!("cannot serialize request: {e}")))?;
        Self::from_serialized(O::DISCRIMINANT, value)
    }

    /// Flattens into the wire form. See [`flatten`].
    #[must_use]
    pub fn flatten(self) -> FlatWireRequest {
        flatten(self)
    }
}

fn scalar_from(name: &str, value: Value) -> Result<Option<WireValue>> {
    match value {
        Value::Array(items) => {
            let parts = items
                .into_iter()
                .filter_map(|item| scalar_from(name, item).transpose())
                .map(|item| item.map(|v| v.to_string()))
                .collect::<Result<Vec<_>>>()?;
            if parts.is_empty() {
                return Ok(None);
            }
            Ok(Some(WireValue::Text(parts.join(","))))
        }
        Value::Object(_) => {
            Err(NmiError::InvalidInput(format!("field '{name}' must be a scalar value")))
        }
        other => WireValue::from_json(name, other),
    }
}

fn line_items_from(value: Value) -> Result<LineItemList> {
    let Value::Array(items) = value else {
        return Err(NmiError::InvalidInput(format!("'{LINE_ITEMS_FIELD}' must be a list")));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let Value::Object(fields) = item else {
                return Err(NmiError::InvalidInput(format!(
                    "'{LINE_ITEMS_FIELD}' entry {} must be an object",
                    index + 1
                )));
            };
            let mut record = LineItemRecord::new();
            for (name, value) in fields {
                if let Some(value) = WireValue::from_json(&name, value)? {
                    record.0.push((name, value));
                }
            }
            Ok(record)
        })
        .collect()
}

fn custom_fields_from(value: Value) -> Result<CustomFieldMap> {
    let Value::Object(entries) = value else {
        return Err(NmiError::InvalidInput(format!("'{CUSTOM_FIELDS_FIELD}' must be a map")));
    };
    let mut map = CustomFieldMap::new();
    for (name, value) in entries {
        if let Some(value) = WireValue::from_json(&name, value)? {
            map.insert(name, value);
        }
    }
    Ok(map)
}

/// Flat wire body: ordered `name -> scalar` pairs, no nesting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatWireRequest(Vec<(String, WireValue)>);

impl FlatWireRequest {
    /// Looks up a field by wire name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WireValue> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Whether a field is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates fields in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WireValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates wire names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Stringified `(name, value)` pairs ready for form encoding.
    #[must_use]
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        self.0.iter().map(|(k, v)| (k.clone(), v.to_string())).collect()
    }

    pub(crate) fn push(&mut self, name: String, value: WireValue) {
        self.0.push((name, value));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_serialized_splits_parts() {
        let request = OperationRequest::from_serialized(
            Some(Discriminant::new("invoicing", "add_invoice")),
            json!({
                "amount": "12.50",
                "email": "a@b.co",
                "payment_terms_allowed": ["cc", "ck"],
                "condition": [],
                "order_description": null,
                "products": [{"item_sku": "A", "item_quantity": 2}],
                "custom_fields": {"z": "last", "a": "first"}
            }),
        )
        .unwrap();

        let flat = request.flatten();
        assert_eq!(flat.get("invoicing"), Some(&WireValue::from("add_invoice")));
        assert_eq!(flat.get("payment_terms_allowed"), Some(&WireValue::from("cc,ck")));
        assert!(!flat.contains("order_description"));
        assert!(!flat.contains("condition"));
        assert_eq!(flat.get("item_quantity_1"), Some(&WireValue::Integer(2)));
        assert_eq!(flat.get("merchant_defined_field_1"), Some(&WireValue::from("last")));
        assert_eq!(flat.get("merchant_defined_field_2"), Some(&WireValue::from("first")));
    }

    #[test]
    fn test_from_serialized_rejects_nested_scalar() {
        let result = OperationRequest::from_serialized(None, json!({"billing": {"city": "X"}}));
        assert!(matches!(result, Err(NmiError::InvalidInput(msg)) if msg.contains("billing")));
    }

    #[test]
    fn test_custom_field_map_replace_keeps_position() {
        let mut map = CustomFieldMap::new();
        map.insert("a", "1");
        map.insert("b", "2");
        map.insert("a", "3");
        let values: Vec<String> = map.into_values().map(|v| v.to_string()).collect();
        assert_eq!(values, ["3", "2"]);
    }

    #[test]
    fn test_custom_field_map_serde_preserves_order() {
        let map: CustomFieldMap =
            serde_json::from_str(r#"{"zeta": "1", "alpha": 2, "mid": true}"#).unwrap();
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);

        let back = serde_json::to_string(&map).unwrap();
        assert_eq!(back, r#"{"zeta":"1","alpha":2,"mid":true}"#);
    }
}
