// Property tests for the Odoo value adapters and id normalization.

use odxproxy_core::{Many2One, OptionalField, RequestId, Response};
use proptest::prelude::*;
use serde_json::{json, Value};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

proptest! {
    #[test]
    fn many2one_round_trips(id in any::<i64>(), name in proptest::option::of("\\PC{0,24}")) {
        let original = Many2One { id: Some(id), name };
        let encoded = serde_json::to_value(&original).unwrap();
        let decoded: Many2One = serde_json::from_value(encoded).unwrap();
        prop_assert_eq!(decoded, original);
    }

    #[test]
    fn many2one_never_fails_on_scalars(value in arb_scalar()) {
        let decoded: Many2One = serde_json::from_value(value).unwrap();
        prop_assert!(!decoded.is_set());
    }

    #[test]
    fn many2one_label_requires_string(id in any::<i64>(), label in arb_scalar()) {
        let decoded: Many2One = serde_json::from_value(json!([id, label.clone()])).unwrap();
        prop_assert_eq!(decoded.id, Some(id));
        prop_assert_eq!(decoded.name.as_deref(), label.as_str());
    }

    #[test]
    fn many2one_numeric_text_id_matches_integer(id in any::<i64>()) {
        let from_text: Many2One = serde_json::from_value(json!([id.to_string(), "X"])).unwrap();
        prop_assert_eq!(from_text, Many2One::new(id, "X"));
    }

    #[test]
    fn optional_string_round_trips(value in "\\PC{0,32}") {
        let original = OptionalField::new(value);
        let encoded = serde_json::to_value(&original).unwrap();
        let decoded: OptionalField<String> = serde_json::from_value(encoded).unwrap();
        prop_assert_eq!(decoded, original);
    }

    #[test]
    fn optional_string_never_fails(value in arb_scalar()) {
        let decoded: OptionalField<String> = serde_json::from_value(value.clone()).unwrap();
        match value {
            Value::String(s) => prop_assert_eq!(decoded.into_option(), Some(s)),
            _ => prop_assert!(!decoded.is_set()),
        }
    }

    #[test]
    fn numeric_and_string_ids_agree(id in any::<u64>()) {
        let from_number: RequestId = serde_json::from_value(json!(id)).unwrap();
        let from_string: RequestId = serde_json::from_value(json!(id.to_string())).unwrap();
        prop_assert_eq!(&from_number, &from_string);
        prop_assert_eq!(serde_json::to_value(&from_number).unwrap(), json!(id.to_string()));
    }
}

#[test]
fn unset_many2one_round_trips() {
    let encoded = serde_json::to_value(Many2One::unset()).unwrap();
    assert_eq!(encoded, Value::Null);
    let decoded: Many2One = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, Many2One::unset());
}

#[test]
fn list_results_use_element_adapters() {
    let response: Response<Vec<OptionalField<String>>> = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "id": 5,
        "result": ["a", false, null, 3, "b"]
    }))
    .unwrap();

    let values: Vec<Option<String>> = response
        .result
        .unwrap()
        .into_iter()
        .map(OptionalField::into_option)
        .collect();
    assert_eq!(
        values,
        vec![Some("a".to_string()), None, None, None, Some("b".to_string())]
    );
}
