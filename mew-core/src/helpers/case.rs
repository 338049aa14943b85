//! Key-name transforms applied to mapping keys.
//!
//! A forward transform is applied to record field names on serialize, and
//! the caller-supplied inverse to incoming keys on deserialize. The pair is
//! never checked for being a true inverse.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

use crate::types::{Mapping, MewError, Value};

type KeyFn = dyn Fn(&str) -> String + Send + Sync;

/// A pure `string -> string` function applied to mapping keys.
#[derive(Clone, Default)]
pub struct KeyTransform {
    // `None` is the identity.
    func: Option<Arc<KeyFn>>,
}

impl KeyTransform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            func: Some(Arc::new(func)),
        }
    }

    pub fn apply(&self, key: &str) -> String {
        match &self.func {
            Some(func) => func(key),
            None => key.to_string(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.func.is_none()
    }
}

impl fmt::Debug for KeyTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            f.write_str("KeyTransform(identity)")
        } else {
            f.write_str("KeyTransform(custom)")
        }
    }
}

/// Turn a snake_case name into PascalCase.
pub fn to_pascal_case(name: &str) -> String {
    name.to_upper_camel_case()
}

/// Turn a PascalCase name into snake_case.
pub fn from_pascal_case(name: &str) -> String {
    name.to_snake_case()
}

/// Turn a snake_case name into camelCase.
pub fn to_camel_case(name: &str) -> String {
    name.to_lower_camel_case()
}

/// Turn a camelCase name into snake_case.
pub fn from_camel_case(name: &str) -> String {
    name.to_snake_case()
}

/// Built-in wire key conventions for snake_case field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCase {
    /// Keys are the field names.
    #[default]
    Identity,
    /// `door_number` <-> `DoorNumber`.
    Pascal,
    /// `door_number` <-> `doorNumber`.
    Camel,
}

impl KeyCase {
    /// Transform applied to field names when serializing.
    pub fn forward(self) -> KeyTransform {
        match self {
            KeyCase::Identity => KeyTransform::identity(),
            KeyCase::Pascal => KeyTransform::new(to_pascal_case),
            KeyCase::Camel => KeyTransform::new(to_camel_case),
        }
    }

    /// Transform applied to incoming keys when deserializing.
    pub fn inverse(self) -> KeyTransform {
        match self {
            KeyCase::Identity => KeyTransform::identity(),
            KeyCase::Pascal => KeyTransform::new(from_pascal_case),
            KeyCase::Camel => KeyTransform::new(from_camel_case),
        }
    }
}

impl FromStr for KeyCase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "identity" | "none" | "snake" => Ok(KeyCase::Identity),
            "pascal" => Ok(KeyCase::Pascal),
            "camel" => Ok(KeyCase::Camel),
            _ => Err(format!("Unknown key case: {}", s)),
        }
    }
}

/// Apply a key transform to every mapping key at every depth.
///
/// Two keys of one mapping that transform to the same key are a
/// `KeyCollision`; no entry is ever dropped.
pub fn transform_keys(value: &Value, transform: &KeyTransform) -> Result<Value, MewError> {
    rewrite(value, transform, "$")
}

fn rewrite(value: &Value, transform: &KeyTransform, path: &str) -> Result<Value, MewError> {
    match value {
        Value::Mapping(mapping) => {
            let mut out = Mapping::with_capacity(mapping.len());
            for (k, v) in mapping {
                let key = transform.apply(k);
                if out.contains_key(&key) {
                    return Err(MewError::key_collision(path, key));
                }
                let child = rewrite(v, transform, &format!("{}.{}", path, k))?;
                out.insert(key, child);
            }
            Ok(Value::Mapping(out))
        }
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| rewrite(v, transform, &format!("{}[{}]", path, i)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence),
        other => Ok(other.clone()),
    }
}
