//! Unit tests for value equality, ordering, and JSON conversion.

use rstest::rstest;
use serde_json::json;

use super::{Value, dedup_values};
use crate::error::ConversionError;
use crate::structure::{Callable, Structure};

#[rstest]
#[case(Value::Number(f64::NAN), Value::Number(f64::NAN), true)]
#[case(Value::Number(0.0), Value::Number(-0.0), true)]
#[case(Value::from("a"), Value::from("a"), true)]
#[case(Value::from(1), Value::from("1"), false)]
#[case(Value::from(vec![1, 2]), Value::from(vec![1, 2]), true)]
#[case(Value::from(vec![1, 2]), Value::from(vec![2, 1]), false)]
#[case(Value::Null, Value::Bool(false), false)]
fn same_value_follows_same_value_zero(
    #[case] left: Value,
    #[case] right: Value,
    #[case] expected: bool,
) {
    assert_eq!(left.same_value(&right), expected);
}

#[test]
fn structures_compare_by_identity() {
    let shared = Structure::new().with("a", 1);
    let twin = Structure::new().with("a", 1);
    assert!(Value::from(shared.clone()).same_value(&Value::from(shared.clone())));
    assert!(!Value::from(shared.clone()).same_value(&Value::from(twin.clone())));
    assert!(Value::from(shared).deep_eq(&Value::from(twin)));
}

#[test]
fn dedup_keeps_first_occurrences() {
    let values = vec![
        Value::from(2),
        Value::from(1),
        Value::from(2),
        Value::from("2"),
        Value::from(1),
    ];
    let unique = dedup_values(values);
    assert_eq!(
        Value::Array(unique).to_json().ok(),
        Some(json!([2, 1, "2"]))
    );
}

#[test]
fn natural_order_ranks_kinds_then_values() {
    let mut values = vec![
        Value::from("b"),
        Value::from(10),
        Value::Null,
        Value::from(9),
        Value::from("a"),
        Value::Bool(true),
        Value::from(vec![1, 2]),
        Value::from(vec![1]),
    ];
    values.sort_by(Value::natural_cmp);
    assert_eq!(
        Value::Array(values).to_json().ok(),
        Some(json!([null, true, 9, 10, "a", "b", [1], [1, 2]]))
    );
}

#[test]
fn text_order_compares_rendered_forms() {
    let mut values = vec![
        Value::from(10),
        Value::from(9),
        Value::from(1),
        Value::from("b"),
        Value::Bool(true),
        Value::Null,
        Value::from("a"),
    ];
    values.sort_by(Value::text_cmp);
    assert_eq!(
        Value::Array(values).to_json().ok(),
        Some(json!([1, 10, 9, "a", "b", null, true]))
    );
}

#[test]
fn text_order_breaks_ties_by_kind_and_puts_structures_last() {
    let shared = Structure::new().with("k", 1);
    let mut values = vec![
        Value::from(shared.clone()),
        Value::from("1"),
        Value::from("zz"),
        Value::from(1),
        Value::from(vec![2, 1]),
    ];
    values.sort_by(Value::text_cmp);
    assert!(values.last().and_then(Value::as_structure).is_some_and(|s| s.ptr_eq(&shared)));
    let rendered: Vec<_> = values.iter().filter_map(Value::sort_text).collect();
    assert_eq!(rendered, ["1", "1", "2,1", "zz"]);
    assert_eq!(values.first().map(Value::kind), Some("number"));
}

#[rstest]
#[case(Value::from(-0.0), "0")]
#[case(Value::from(2.5), "2.5")]
#[case(Value::from(1e21), "1e+21")]
#[case(Value::from(1.5e-7), "1.5e-7")]
#[case(Value::Number(f64::NAN), "NaN")]
#[case(Value::Number(f64::NEG_INFINITY), "-Infinity")]
#[case(Value::from(vec![Value::from(1), Value::Null, Value::from("x")]), "1,,x")]
fn sort_text_renders_like_a_document(#[case] value: Value, #[case] expected: &str) {
    assert_eq!(value.sort_text().as_deref(), Some(expected));
}

#[rstest]
#[case(Value::Null, false)]
#[case(Value::from(0), false)]
#[case(Value::Number(f64::NAN), false)]
#[case(Value::from(""), false)]
#[case(Value::from("x"), true)]
#[case(Value::Array(Vec::new()), true)]
#[case(Value::from(Structure::new()), true)]
fn truthiness_matches_boolean_coercion(#[case] value: Value, #[case] expected: bool) {
    assert_eq!(value.is_truthy(), expected);
}

#[test]
fn to_json_skips_hidden_keys_and_functions() {
    let structure = Structure::new().with("shown", 1).with(
        "method",
        Callable::new(|_, _| Ok(Value::Null)),
    );
    structure.define(
        "hidden",
        crate::structure::Property::data(2).with_enumerable(false),
    );
    let json = Value::from(structure).to_json().ok();
    assert_eq!(json, Some(json!({"shown": 1})));
}

#[test]
fn to_json_rejects_cycles_with_their_path() {
    let root = Structure::new().with("a", 1);
    let child = Structure::new();
    child.define_value("parent", root.clone());
    root.define_value("child", child);
    let err = Value::from(root).to_json().err();
    assert!(
        matches!(&err, Some(ConversionError::Circular { path }) if path == "$.child.parent"),
        "unexpected result: {err:?}"
    );
}

#[test]
fn to_json_emits_integers_for_integral_numbers() {
    let json = Value::from(vec![Value::from(3), Value::Number(1.5)]).to_json().ok();
    assert_eq!(json, Some(json!([3, 1.5])));
}
