//! Property-based tests for the transform engine.
//!
//! Strategies generate tagged documents (valid and invalid payloads mixed,
//! nested lists and maps, whitespace-padded keys) and check the invariants
//! that must hold for every input:
//!
//! - blank keys never reach the output
//! - integer literals become integers, leading zeros and padding stripped
//! - RFC3339 instants become their epoch second
//! - map keys come out strictly ascending, list order is preserved
//! - the same input always yields byte-identical output
use chrono::{DateTime, SecondsFormat};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use tagjson_core::{transform_document, transform_str, transform_value, Transformed};

// ============================================================================
// Strategies
// ============================================================================

/// Keys with optional padding; some are blank.
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::string::string_regex("[ ]{0,2}[a-zA-Z_][a-zA-Z0-9_]{0,8}[ ]{0,2}").unwrap(),
        1 => prop::string::string_regex("[ \t]{0,3}").unwrap(),
    ]
}

/// Scalar payload text, mixing valid tokens with junk.
fn arb_token() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-z0-9 ]{0,10}").unwrap(),
        (-1_000_000i64..1_000_000).prop_map(|n| n.to_string()),
        Just("1.50".to_string()),
        Just("true".to_string()),
        Just("F".to_string()),
        Just("2014-07-16T20:55:46Z".to_string()),
        Just("".to_string()),
    ]
}

fn arb_scalar_tagged() -> impl Strategy<Value = Value> {
    (
        prop_oneof![Just("S"), Just("N"), Just("BOOL"), Just("NULL"), Just("NULL ")],
        arb_token(),
    )
        .prop_map(|(tag, token)| {
            let mut wrapper = Map::new();
            wrapper.insert(tag.to_string(), Value::String(token));
            Value::Object(wrapper)
        })
}

/// Any tagged value, nested up to a few levels, valid or not.
fn arb_tagged() -> impl Strategy<Value = Value> {
    arb_scalar_tagged().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(|items| json!({ "L": items })),
            prop::collection::vec((arb_key(), inner), 0..6).prop_map(|entries| {
                let map: Map<String, Value> = entries.into_iter().collect();
                json!({ "M": map })
            }),
        ]
    })
}

fn arb_document() -> impl Strategy<Value = Value> {
    prop::collection::vec((arb_key(), arb_tagged()), 0..8)
        .prop_map(|entries| Value::Object(entries.into_iter().collect()))
}

// ============================================================================
// Invariant checks
// ============================================================================

/// Walk the output: every object has non-blank, trimmed, strictly ascending keys.
fn assert_clean_objects(value: &Value, sorted: bool) {
    match value {
        Value::Object(map) => {
            let keys: Vec<&String> = map.keys().collect();
            for key in &keys {
                assert!(!key.is_empty(), "blank key in output");
                assert_eq!(key.trim(), key.as_str(), "untrimmed key in output");
            }
            if sorted {
                for pair in keys.windows(2) {
                    assert!(pair[0] < pair[1], "keys not ascending: {:?}", keys);
                }
            }
            for child in map.values() {
                assert_clean_objects(child, true);
            }
        }
        Value::Array(items) => {
            assert!(!items.is_empty(), "empty list in output");
            for item in items {
                assert!(
                    !item.is_object() && !item.is_array() && !item.is_null(),
                    "disallowed list element {item}"
                );
            }
        }
        _ => {}
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn output_objects_are_clean_and_sorted(doc in arb_document()) {
        let out = transform_document(&doc).unwrap();
        assert_clean_objects(&out, true);
    }

    #[test]
    fn output_maps_are_never_empty(tagged in arb_tagged()) {
        if let Transformed::Value(Value::Object(map)) = transform_value(&tagged) {
            prop_assert!(!map.is_empty());
        }
    }

    #[test]
    fn transform_is_deterministic(doc in arb_document()) {
        let text = serde_json::to_string(&doc).unwrap();
        let first = transform_str(&text).unwrap();
        let second = transform_str(&text).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn blank_top_level_keys_are_dropped(
        pad in "[ \t]{0,4}",
        tagged in arb_scalar_tagged(),
    ) {
        let mut doc = Map::new();
        doc.insert(pad, tagged);
        let out = transform_document(&Value::Object(doc)).unwrap();
        prop_assert_eq!(out, json!({}));
    }

    #[test]
    fn integer_literals_parse_with_zeros_and_padding(
        n in 0u32..10_000_000,
        zeros in 0usize..4,
        left in "[ \t]{0,3}",
        right in "[ \t]{0,3}",
    ) {
        let literal = format!("{left}{}{n}{right}", "0".repeat(zeros));
        let out = transform_value(&json!({ "N": literal }));
        prop_assert_eq!(out, Transformed::Value(json!(n)));
    }

    #[test]
    fn negative_integer_literals_parse(n in i64::MIN..0i64) {
        let out = transform_value(&json!({ "N": n.to_string() }));
        prop_assert_eq!(out, Transformed::Value(json!(n)));
    }

    #[test]
    fn rfc3339_strings_become_epoch(secs in 0i64..4_102_444_800) {
        let text = DateTime::from_timestamp(secs, 0)
            .unwrap()
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let out = transform_value(&json!({ "S": text }));
        prop_assert_eq!(out, Transformed::Value(json!(secs)));
    }

    #[test]
    fn plain_strings_pass_through_trimmed(text in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,20}", pad in "[ ]{0,3}") {
        let out = transform_value(&json!({ "S": format!("{pad}{text}{pad}") }));
        prop_assert_eq!(out, Transformed::Value(json!(text.trim())));
    }

    #[test]
    fn list_preserves_order(words in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let items: Vec<Value> = words.iter().map(|w| json!({ "S": w })).collect();
        let out = transform_value(&json!({ "L": items }));
        prop_assert_eq!(out, Transformed::Value(json!(words)));
    }

    #[test]
    fn unknown_bool_tokens_are_omitted(token in "[a-zA-Z]{2,6}") {
        prop_assume!(!["TRUE", "true", "True", "FALSE", "false", "False"].contains(&token.as_str()));
        prop_assert_eq!(transform_value(&json!({ "BOOL": token })), Transformed::Omit);
    }
}
