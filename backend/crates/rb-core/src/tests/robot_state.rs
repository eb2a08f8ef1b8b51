use crate::RobotState;

use serde_json::{Value, json};

#[test]
fn given_state_with_extra_fields_when_serialized_then_fields_are_flattened() {
    let state: RobotState = serde_json::from_value(json!({
        "__class": "RobotState",
        "attributes": [{"__class": "StatusStateAttribute", "value": "idle"}],
        "map": {"pixelSize": 5}
    }))
    .unwrap();

    let value: Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();

    assert_eq!(value["__class"], json!("RobotState"));
    assert_eq!(value["map"]["pixelSize"], json!(5));
    assert_eq!(value["attributes"][0]["value"], json!("idle"));
}

#[test]
fn given_state_when_fragments_serialized_then_match_fields() {
    let state = RobotState {
        attributes: vec![json!({"level": 3})],
        map: json!({"layers": []}),
        extra: serde_json::Map::new(),
    };

    assert_eq!(state.attributes_json().unwrap(), r#"[{"level":3}]"#);
    assert_eq!(state.map_json().unwrap(), r#"{"layers":[]}"#);
}

#[test]
fn given_missing_fields_when_deserialized_then_defaults_used() {
    let state: RobotState = serde_json::from_value(json!({})).unwrap();

    assert!(state.attributes.is_empty());
    assert_eq!(state.map, Value::Null);
}
