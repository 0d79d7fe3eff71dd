use confdiff_core::{Mapping, Value};
use proptest::{collection, prelude::*, string::string_regex};
use serde_json::Value as JsonValue;

fn arb_json_value() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        (-1000i64..1000).prop_map(|n| JsonValue::Number(n.into())),
        string_regex("[a-z0-9 ]{0,6}").unwrap().prop_map(JsonValue::String),
    ];

    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            collection::vec(inner.clone(), 0..3).prop_map(JsonValue::Array),
            collection::vec((string_regex("[a-d]{1,2}").unwrap(), inner), 0..4)
                .prop_map(|entries| JsonValue::Object(unique_keys(entries))),
        ]
    })
}

/// Mappings drawn from a small key alphabet so that two independent samples
/// share keys often enough to exercise nesting and changes.
///
/// Keys keep the order they were generated in, so documents are usually not
/// sorted. A repeated key keeps its first position.
pub fn arb_mapping() -> impl Strategy<Value = Mapping> {
    collection::vec((string_regex("[a-d]{1,2}").unwrap(), arb_json_value()), 0..6).prop_map(
        |entries| {
            Value::from_json_value(JsonValue::Object(unique_keys(entries)))
                .and_then(Value::into_mapping)
                .expect("generated object is a mapping")
        },
    )
}

fn unique_keys(entries: Vec<(String, JsonValue)>) -> serde_json::Map<String, JsonValue> {
    let mut object = serde_json::Map::new();
    for (key, value) in entries {
        object.entry(key).or_insert(value);
    }
    object
}
