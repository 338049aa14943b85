//! Registration accepts supported schemas and rejects everything else.

mod common;

use std::collections::{BTreeMap, HashMap};

use common::*;
use mew_core::{register, Describe, ErrorKind, ScalarKind, TypeDescriptor};

mew_core::record! {
    struct Callback {
        name: String,
        on_change: fn(String),
    }
}

mew_core::record! {
    struct Settings {
        values: BTreeMap<String, String>,
    }
}

mew_core::record! {
    struct Deeply {
        inner: Vec<Option<Callback>>,
        lookup: HashMap<String, i64>,
    }
}

fn offending(err: &mew_core::MewError) -> Vec<String> {
    match err.kind() {
        ErrorKind::NotSupported { offending, .. } => offending.clone(),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_callable_field_is_rejected_by_name() {
    let err = register::<Callback>().unwrap_err();
    assert!(err.is_not_supported());
    let offending = offending(&err);
    assert_eq!(offending.len(), 1);
    assert!(offending[0].starts_with("Callback.on_change: fn("));
    assert!(err.to_string().contains("Callback.on_change"));
}

#[test]
fn test_map_field_is_rejected() {
    let err = register::<Settings>().unwrap_err();
    assert_eq!(
        offending(&err),
        vec!["Settings.values: BTreeMap<string, string>"]
    );
}

#[test]
fn test_every_offending_field_is_listed() {
    let err = register::<Deeply>().unwrap_err();
    let offending = offending(&err);
    assert_eq!(offending.len(), 2);
    assert!(offending[0].starts_with("Callback.on_change: fn("));
    assert_eq!(offending[1], "Deeply.lookup: HashMap<string, integer>");
}

#[test]
fn test_supported_schemas_register() {
    assert!(register::<Student>().is_ok());
    assert!(register::<Pokemon>().is_ok());
    assert!(register::<Vec<Option<Subject>>>().is_ok());
    assert!(register::<chrono::NaiveDateTime>().is_ok());
}

#[test]
fn test_classification_is_deterministic() {
    assert_eq!(Address::describe(), Address::describe());
    match Address::describe() {
        TypeDescriptor::Record { name, fields } => {
            assert_eq!(name, "Address");
            assert_eq!(fields[0].descriptor, TypeDescriptor::scalar(ScalarKind::Uuid));
            assert_eq!(
                fields[2].descriptor,
                TypeDescriptor::optional(TypeDescriptor::scalar(ScalarKind::String))
            );
            assert_eq!(fields[4].descriptor, GeoPosition::describe());
        }
        other => panic!("unexpected descriptor: {:?}", other),
    }
}

#[test]
fn test_geo_position_is_a_tuple() {
    match GeoPosition::describe() {
        TypeDescriptor::Tuple { name, fields } => {
            assert_eq!(name, "GeoPosition");
            let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, vec!["latitude", "longitude"]);
            assert_eq!(fields[0].descriptor, TypeDescriptor::scalar(ScalarKind::Float));
        }
        other => panic!("unexpected descriptor: {:?}", other),
    }
    assert!(register::<(GeoPosition, Vec<Address>)>().is_ok());
}

#[test]
fn test_enumeration_descriptor_keeps_wire_values() {
    match PokemonType::describe() {
        TypeDescriptor::Enumeration { name, members } => {
            assert_eq!(name, "PokemonType");
            assert_eq!(members[1].name, "Electric");
            assert_eq!(members[1].value, mew_core::Value::from("electric"));
        }
        other => panic!("unexpected descriptor: {:?}", other),
    }
}
