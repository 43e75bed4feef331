//! Property tests for the wire codec and response normalization.

use nmi_gateway::{
    NmiError,
    normalize::{Container, EACH, Encoding, RawResponse, coerce_containers, normalize},
    response::RecurringPlansReport,
    wire::{CustomFieldMap, Discriminant, LineItemRecord, OperationRequest, WireValue},
};
use proptest::prelude::*;
use serde_json::{Value, json};

const CONTAINERS: &[Container] = &[
    Container::list(&["transaction"]),
    Container::list(&["transaction", EACH, "action"]),
    Container::wrapped(&["customer_vault"], "customer"),
];

fn container_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!("")),
        "[a-z0-9]{1,8}".prop_map(|s| json!({ "id": s })),
        prop::collection::vec("[a-z0-9]{1,8}", 0..4)
            .prop_map(|ids| Value::Array(ids.into_iter().map(|id| json!({ "id": id })).collect())),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_line_items_get_positional_suffixes(
        skus in prop::collection::vec("[A-Z0-9]{1,12}", 0..10),
    ) {
        let items = skus
            .iter()
            .map(|sku| LineItemRecord::new().with("item_product_code", sku.as_str()).with("item_quantity", 1))
            .collect();
        let flat = OperationRequest::new(Some(Discriminant::new("type", "sale")))
            .field("amount", "1.00")
            .line_items(items)
            .flatten();

        prop_assert_eq!(flat.len(), 2 + skus.len() * 2);
        for (index, sku) in skus.iter().enumerate() {
            let name = format!("item_product_code_{}", index + 1);
            prop_assert_eq!(flat.get(&name), Some(&WireValue::from(sku.as_str())));
        }
        let past_end = format!("item_product_code_{}", skus.len() + 1);
        prop_assert!(!flat.contains(&past_end));
    }

    #[test]
    fn test_custom_field_numbering_ignores_keys(
        prefix in "[a-z]{1,6}",
        values in prop::collection::vec("[a-zA-Z0-9]{1,16}", 1..20),
    ) {
        let fields: CustomFieldMap = values
            .iter()
            .enumerate()
            .map(|(index, value)| (format!("{prefix}{index}"), value.clone()))
            .collect();
        let flat = OperationRequest::new(None).custom_fields(fields).flatten();

        prop_assert_eq!(flat.len(), values.len());
        for (index, value) in values.iter().enumerate() {
            let name = format!("merchant_defined_field_{}", index + 1);
            prop_assert_eq!(flat.get(&name), Some(&WireValue::from(value.clone())));
        }
        prop_assert!(flat.keys().all(|name| name.starts_with("merchant_defined_field_")));
    }

    #[test]
    fn test_container_coercion_is_idempotent(
        transaction in container_value(),
        vault in container_value(),
    ) {
        let mut once = json!({ "transaction": transaction, "customer_vault": vault });
        coerce_containers(&mut once, CONTAINERS);

        let mut twice = once.clone();
        coerce_containers(&mut twice, CONTAINERS);

        prop_assert_eq!(&once, &twice);
        prop_assert!(once["transaction"].is_array());
    }

    #[test]
    fn test_error_envelope_wins_over_shape(
        plan_id in "[a-z0-9]{1,12}",
        message in "[A-Za-z0-9]{1,30}",
    ) {
        let body = format!(
            "<nm_response><plan><plan_id>{plan_id}</plan_id></plan>\
             <error_response>{message}</error_response></nm_response>"
        );
        let raw = RawResponse { status: 200, body, encoding: Encoding::Xml };

        let result = normalize::<RecurringPlansReport>(&raw);

        prop_assert!(matches!(result, Err(NmiError::GatewayError(m)) if m == message));
    }
}
