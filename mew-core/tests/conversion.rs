//! Behaviour of typed conversion through the public API.

mod common;

use common::*;
use mew_core::{
    from_text, parse, register, render, to_text, transform_keys, ErrorKind, Format, KeyCase,
    KeyTransform, Options, Value,
};

mew_core::one_of! {
    #[derive(Debug, Clone, PartialEq)]
    enum IntOrText {
        Int(i64),
        Text(String),
    }
}

mew_core::one_of! {
    #[derive(Debug, Clone, PartialEq)]
    enum Location {
        Coordinates(GeoPosition),
        Named(Address),
        Label(String),
    }
}

mew_core::record! {
    #[derive(Debug, Clone, PartialEq)]
    struct Delivery {
        reference: IntOrText,
        destination: Location,
        notes: Option<Vec<String>>,
    }
}

#[test]
fn test_pascal_keys_at_every_depth() {
    let teacher = Teacher {
        id: oak_street().id,
        name: "Grace".into(),
        address: oak_street(),
    };
    let registered = register::<Teacher>().unwrap();
    let value = registered
        .to_value(&teacher, &KeyCase::Pascal.forward())
        .unwrap();

    let address = value.get("Address").unwrap();
    assert_eq!(address.get("DoorNumber"), Some(&Value::from(5i64)));
    assert_eq!(address.get("StreetName"), Some(&Value::from("Oak")));
    assert!(address.get("door_number").is_none());
    let geo = address.get("GeoPosition").unwrap();
    assert_eq!(geo, &Value::from(vec![Value::from(51.5), Value::from(0.25)]));
}

#[test]
fn test_union_string_is_never_coerced_to_int() {
    let registered = register::<IntOrText>().unwrap();
    let identity = KeyTransform::identity();

    let text = registered.from_value(&Value::from("5"), &identity).unwrap();
    assert_eq!(text, IntOrText::Text("5".into()));

    let int = registered.from_value(&Value::from(5i64), &identity).unwrap();
    assert_eq!(int, IntOrText::Int(5));

    let err = registered.from_value(&Value::from(5.5), &identity).unwrap_err();
    assert_eq!(err.error_type(), "no_matching_union_alternative");
}

#[test]
fn test_union_of_records_picks_first_structural_match() {
    let options = Options::json();
    let cases = [
        (
            r#"{"reference": 7, "destination": [1.0, 2.0], "notes": null}"#,
            Location::Coordinates(GeoPosition {
                latitude: 1.0,
                longitude: 2.0,
            }),
        ),
        (
            r#"{"reference": "x", "destination": "depot", "notes": null}"#,
            Location::Label("depot".into()),
        ),
    ];
    for (text, expected) in cases {
        let delivery: Delivery = from_text(text, &options).unwrap();
        assert_eq!(delivery.destination, expected);
    }

    let named = Delivery {
        reference: IntOrText::Int(1),
        destination: Location::Named(oak_street()),
        notes: Some(vec!["fragile".into()]),
    };
    let text = to_text(&named, &options).unwrap();
    assert_eq!(from_text::<Delivery>(&text, &options).unwrap(), named);
}

#[test]
fn test_union_error_names_every_alternative() {
    let err = from_text::<Delivery>(
        r#"{"reference": true, "destination": "depot", "notes": null}"#,
        &Options::json(),
    )
    .unwrap_err();
    match err.kind() {
        ErrorKind::NoMatchingUnionAlternative {
            path, alternatives, ..
        } => {
            assert_eq!(path, "$.reference");
            assert_eq!(alternatives, &vec!["integer".to_string(), "string".to_string()]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_enum_serializes_wire_value_not_name() {
    let value = register::<Pokemon>()
        .unwrap()
        .to_value(&pikachu(), &KeyTransform::identity())
        .unwrap();
    assert_eq!(value.get("type"), Some(&Value::from("electric")));
    assert_ne!(value.get("type"), Some(&Value::from("Electric")));
}

#[test]
fn test_enum_rejects_member_name() {
    let err = from_text::<Pokemon>(
        r#"{"name": "Pikachu", "pokedex": 25, "type": "Electric", "abilities": []}"#,
        &Options::json(),
    )
    .unwrap_err();
    assert_eq!(err.error_type(), "unknown_enum_value");
    assert_eq!(err.kind().path(), Some("$.type"));
}

#[test]
fn test_integer_enum_values() {
    let lecture_subject = register::<Subject>().unwrap();
    let identity = KeyTransform::identity();
    assert_eq!(
        lecture_subject.to_value(&Subject::Computing, &identity).unwrap(),
        Value::from(2i64)
    );
    assert_eq!(
        lecture_subject.from_value(&Value::from(1i64), &identity).unwrap(),
        Subject::English
    );
}

#[test]
fn test_identifier_roundtrip_is_exact() {
    let raw = "10fb6968-6b54-44c8-9365-e0b3934ae156";
    let registered = register::<uuid::Uuid>().unwrap();
    let identity = KeyTransform::identity();
    let id = registered.from_value(&Value::from(raw), &identity).unwrap();
    assert_eq!(registered.to_value(&id, &identity).unwrap(), Value::from(raw));
}

#[test]
fn test_yaml_format_parity() {
    let items = vec!["foo".to_string(), "bar".to_string()];
    let text = to_text(&items, &Options::yaml()).unwrap();
    assert_eq!(text, "- foo\n- bar\n");
    assert_eq!(from_text::<Vec<String>>(&text, &Options::yaml()).unwrap(), items);
}

#[test]
fn test_float_in_integer_field_reports_path() {
    let err = from_text::<Teacher>(
        r#"{
            "id": "10fb6968-6b54-44c8-9365-e0b3934ae156",
            "name": "Grace",
            "address": {
                "id": "10fb6968-6b54-44c8-9365-e0b3934ae156",
                "door_number": 5.0,
                "house_name": null,
                "street_name": "Oak",
                "geo_position": [1, 2]
            }
        }"#,
        &Options::json(),
    )
    .unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(err.kind().path(), Some("$.address.door_number"));
}

#[test]
fn test_nested_sequence_error_path() {
    let text = r#"{
        "id": "10fb6968-6b54-44c8-9365-e0b3934ae156",
        "name": "Ada",
        "address": {
            "id": "10fb6968-6b54-44c8-9365-e0b3934ae156",
            "door_number": 5,
            "street_name": "Oak",
            "geo_position": [1, 2]
        },
        "lectures": [{
            "id": "not-a-uuid",
            "name": "Algebra",
            "timestamp": "2020-05-17T10:00:00+01:00",
            "teacher": {
                "id": "10fb6968-6b54-44c8-9365-e0b3934ae156",
                "name": "Grace",
                "address": {
                    "id": "10fb6968-6b54-44c8-9365-e0b3934ae156",
                    "door_number": 5,
                    "street_name": "Oak",
                    "geo_position": [1, 2]
                }
            },
            "subject": 0
        }]
    }"#;
    let err = from_text::<Student>(text, &Options::json()).unwrap_err();
    assert_eq!(err.error_type(), "malformed_scalar_literal");
    assert_eq!(err.kind().path(), Some("$.lectures[0].id"));
}

#[test]
fn test_mismatched_transforms_fail_on_missing_key() {
    let options = Options::json().with_keys(
        KeyCase::Pascal.forward(),
        KeyTransform::new(|key| key.to_lowercase()),
    );
    let text = to_text(&oak_street(), &options).unwrap();
    let err = from_text::<Address>(&text, &options).unwrap_err();
    match err.kind() {
        ErrorKind::MissingField { field, record, .. } => {
            assert_eq!(record, "Address");
            assert_eq!(field, "door_number");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_unsupported_format_name() {
    let err = "xml".parse::<Format>().unwrap_err();
    assert!(err.is_unsupported_format());
}

#[test]
fn test_render_and_parse_are_inverse() {
    let value = parse(r#"{"b": [1, 2.5, null], "a": {"c": true}}"#, Format::Json).unwrap();
    let yaml = render(&value, Format::Yaml).unwrap();
    assert_eq!(parse(&yaml, Format::Yaml).unwrap(), value);
    assert_eq!(
        render(&value, Format::Json).unwrap(),
        r#"{"b":[1,2.5,null],"a":{"c":true}}"#
    );
}

#[test]
fn test_duplicate_keys_rejected() {
    let err = parse(r#"{"a": 1, "a": 2}"#, Format::Json).unwrap_err();
    assert_eq!(err.error_type(), "json_error");
}

#[test]
fn test_geo_position_is_positional() {
    let text = to_text(&oak_street(), &Options::json().with_key_case(KeyCase::Pascal)).unwrap();
    assert!(text.ends_with(r#""GeoPosition":[51.5,0.25]}"#), "{}", text);

    let yaml = to_text(&oak_street(), &Options::yaml()).unwrap();
    assert!(yaml.contains("geo_position:\n- 51.5\n- 0.25\n"), "{}", yaml);
    assert_eq!(from_text::<Address>(&yaml, &Options::yaml()).unwrap(), oak_street());
}

#[test]
fn test_geo_position_needs_exactly_two_elements() {
    for geo in ["[51.5]", "[51.5, 0.25, 3.0]", r#"{"latitude": 51.5, "longitude": 0.25}"#] {
        let text = format!(
            r#"{{"id": "10fb6968-6b54-44c8-9365-e0b3934ae156", "door_number": 5,
                "street_name": "Oak", "geo_position": {}}}"#,
            geo
        );
        let err = from_text::<Address>(&text, &Options::json()).unwrap_err();
        assert!(err.is_type_mismatch(), "{}: {}", geo, err);
        assert_eq!(err.kind().path(), Some("$.geo_position"));
    }

    let text = r#"{"id": "10fb6968-6b54-44c8-9365-e0b3934ae156", "door_number": 5,
        "street_name": "Oak", "geo_position": [51.5, "east"]}"#;
    let err = from_text::<Address>(text, &Options::json()).unwrap_err();
    assert_eq!(err.kind().path(), Some("$.geo_position[1]"));
}

#[test]
fn test_two_keys_for_one_field_are_a_collision() {
    let text = r#"{
        "Id": "10fb6968-6b54-44c8-9365-e0b3934ae156",
        "DoorNumber": 5,
        "door_number": 6,
        "StreetName": "Oak",
        "GeoPosition": [1, 2]
    }"#;
    let err = from_text::<Address>(text, &Options::json().with_key_case(KeyCase::Pascal)).unwrap_err();
    match err.kind() {
        ErrorKind::KeyCollision { path, key } => {
            assert_eq!(path, "$");
            assert_eq!(key, "door_number");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_uppercase_identifier_is_malformed() {
    let text = r#"{"id": "10FB6968-6B54-44C8-9365-E0B3934AE156", "door_number": 5,
        "street_name": "Oak", "geo_position": [1, 2]}"#;
    let err = from_text::<Address>(text, &Options::json()).unwrap_err();
    assert_eq!(err.error_type(), "malformed_scalar_literal");
    assert_eq!(err.kind().path(), Some("$.id"));
}

#[test]
fn test_deep_key_rewrite_never_drops_entries() {
    let value = parse(r#"{"outer": {"door_number": 1, "DoorNumber": 2}}"#, Format::Json).unwrap();
    let err = transform_keys(&value, &KeyCase::Pascal.inverse()).unwrap_err();
    assert_eq!(err.error_type(), "key_collision");
    assert_eq!(err.kind().path(), Some("$.outer"));
}
