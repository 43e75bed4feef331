//! Field flattening.

use super::{FlatWireRequest, OperationRequest};

/// Wire prefix for positional custom fields.
pub const MERCHANT_DEFINED_FIELD_PREFIX: &str = "merchant_defined_field_";

/// Flattens a structured request into the gateway's positional naming.
///
/// Output order: discriminant, scalar fields as given, then each line item's
/// fields suffixed `_1.._n` in list order, then custom fields as
/// `merchant_defined_field_1..` in insertion order. Custom field keys are
/// discarded. Empty lists and maps emit nothing.
#[must_use]
pub fn flatten(request: OperationRequest) -> FlatWireRequest {
    let OperationRequest { discriminant, fields, line_items, custom_fields } = request;

    let mut flat = FlatWireRequest::default();

    if let Some(discriminant) = discriminant {
        flat.push(discriminant.field.to_owned(), discriminant.value.into());
    }

    for (name, value) in fields {
        flat.push(name, value);
    }

    for (index, record) in line_items.into_iter().enumerate() {
        let position = index + 1;
        for (name, value) in record {
            flat.push(format!("{name}_{position}"), value);
        }
    }

    for (index, value) in custom_fields.into_values().enumerate() {
        flat.push(format!("{MERCHANT_DEFINED_FIELD_PREFIX}{}", index + 1), value);
    }

    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{CustomFieldMap, Discriminant, LineItemRecord, WireValue};

    #[test]
    fn test_products_flatten_scenario() {
        let flat = OperationRequest::new(None)
            .field("amount", 10)
            .line_items(vec![
                LineItemRecord::new().with("sku", "A").with("qty", 1),
                LineItemRecord::new().with("sku", "B").with("qty", 2),
            ])
            .flatten();

        let keys: Vec<&str> = flat.keys().collect();
        assert_eq!(keys, ["amount", "sku_1", "qty_1", "sku_2", "qty_2"]);
        assert_eq!(flat.get("amount"), Some(&WireValue::Integer(10)));
        assert_eq!(flat.get("sku_2"), Some(&WireValue::from("B")));
        assert_eq!(flat.get("qty_2"), Some(&WireValue::Integer(2)));
        assert!(!flat.contains("products"));
    }

    #[test]
    fn test_absent_line_item_fields_are_skipped() {
        let flat = OperationRequest::new(None)
            .line_items(vec![
                LineItemRecord::new().with("item_description", "Widget"),
                LineItemRecord::new().with("item_description", "Gadget").with("item_tax_amount", 1),
            ])
            .flatten();

        assert!(!flat.contains("item_tax_amount_1"));
        assert!(flat.contains("item_tax_amount_2"));
        assert_eq!(flat.len(), 3);
    }

    #[test]
    fn test_empty_parts_emit_nothing() {
        let flat = OperationRequest::new(Some(Discriminant::new("products", "add_product")))
            .line_items(Vec::new())
            .custom_fields(CustomFieldMap::new())
            .flatten();

        assert_eq!(flat.len(), 1);
        assert_eq!(flat.get("products"), Some(&WireValue::from("add_product")));
    }

    #[test]
    fn test_custom_fields_beyond_twenty_are_kept() {
        let map: CustomFieldMap = (0..25).map(|i| (format!("k{i}"), i)).collect();
        let flat = OperationRequest::new(None).custom_fields(map).flatten();

        assert_eq!(flat.len(), 25);
        assert_eq!(flat.get("merchant_defined_field_25"), Some(&WireValue::Integer(24)));
    }
}
