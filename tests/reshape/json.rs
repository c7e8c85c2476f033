//! Integration tests for the JSON serialization boundary.

use regroup::reshape::{DeepMap, ErrorKind, Key, RecordSeq, Value, atoms, record};

#[test]
fn nested_object_round_trip() {
    let mut map = DeepMap::new();
    map.set_nested(
        &atoms!["a", "b", "c"],
        Value::Seq([record![1], record![2], record![3]].into_iter().collect::<RecordSeq>()),
    )
    .unwrap();

    let text = map.to_json_string().unwrap();
    assert_eq!(text, r#"{"a":{"b":{"c":[1,2,3]}}}"#);

    let parsed = DeepMap::from_json_str(&text).unwrap();
    assert_eq!(parsed, map);
}

#[test]
fn ingested_objects_coerce_recursively() {
    let parsed = DeepMap::from_json_str(r#"{"c": {"f": {"g": "h"}}, "a": "b"}"#).unwrap();
    assert_eq!(parsed.get_nested(&atoms!["c", "f", "g"]), Some(&Value::from("h")));
    assert!(parsed.get(&Key::from("c")).unwrap().as_map().is_some());
}

#[test]
fn scalar_shapes_survive() {
    let text = r#"{"b": true, "f": 1.5, "i": 7, "n": null, "s": "x"}"#;
    let parsed = DeepMap::from_json_str(text).unwrap();
    assert_eq!(parsed.to_json_string().unwrap(), text);
}

#[test]
fn tuple_keys_must_be_expanded_first() {
    let map: DeepMap = [(Key::Tuple(atoms!["a", "b"]), Value::from(1))]
        .into_iter()
        .collect();
    let err = map.to_json_string().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnrepresentableKey { .. }));

    let text = map.expand_tuple_keys().unwrap().to_json_string().unwrap();
    let recovered = DeepMap::from_json_str(&text).unwrap().flatten_to_tuple_keys();
    assert_eq!(recovered, map);
}

#[test]
fn nested_tuple_keys_are_caught() {
    let mut inner = DeepMap::new();
    inner.insert(Key::Tuple(atoms!["x", "y"]), Value::from(1));
    let mut map = DeepMap::new();
    map.insert(Key::from("outer"), Value::Map(inner));

    let err = map.to_json_string().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnrepresentableKey { .. }));
}

#[test]
fn grouped_pipeline_through_json() {
    // group → expand → serialize → parse → flatten → regroup
    let seq: RecordSeq = [
        record!["a", "b", 1],
        record!["a", "b", 2],
        record!["r", "b", 1],
    ]
    .into_iter()
    .collect();
    let grouped = seq
        .group_by(Some(&[regroup::reshape::Column::Pos(2)]), None, true)
        .unwrap();

    let text = grouped.expand_tuple_keys().unwrap().to_json_string().unwrap();
    let recovered = DeepMap::from_json_str(&text).unwrap().flatten_to_tuple_keys();
    assert_eq!(recovered, grouped);
}

#[test]
fn malformed_input_is_a_json_error() {
    let err = DeepMap::from_json_str("{").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Json { .. }));
}
