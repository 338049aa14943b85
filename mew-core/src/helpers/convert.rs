//! Structural converter between native values and intermediate values.
//!
//! Both directions walk a [`TypeDescriptor`]: scalars are delegated to the
//! [`ScalarRegistry`], composites recurse. Unions are resolved on the way in
//! by trying each alternative in declaration order.

use std::fmt;

use crate::helpers::case::KeyTransform;
use crate::helpers::registry::{codec_error, ScalarRegistry};
use crate::types::{Mapping, MewError, Native, NativeRecord, ScalarKind, TypeDescriptor, Value};

/// Location of a subtree within the value being converted.
#[derive(Clone, Copy)]
enum Path<'a> {
    Root,
    Field(&'a Path<'a>, &'a str),
    Index(&'a Path<'a>, usize),
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Path::Root => f.write_str("$"),
            Path::Field(parent, name) => write!(f, "{}.{}", parent, name),
            Path::Index(parent, index) => write!(f, "{}[{}]", parent, index),
        }
    }
}

/// Descriptor-driven converter.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'r> {
    registry: &'r ScalarRegistry,
}

impl Default for Converter<'static> {
    fn default() -> Self {
        Self::new(ScalarRegistry::global())
    }
}

impl<'r> Converter<'r> {
    pub fn new(registry: &'r ScalarRegistry) -> Self {
        Self { registry }
    }

    /// Serialize a native value described by `descriptor`.
    ///
    /// Record field names go through `key_transform`; enumeration members
    /// become their wire value; union values are written untagged.
    pub fn convert_out(
        &self,
        native: &Native,
        descriptor: &TypeDescriptor,
        key_transform: &KeyTransform,
    ) -> Result<Value, MewError> {
        self.out(native, descriptor, key_transform, &Path::Root)
    }

    /// Deserialize an intermediate value as `descriptor`.
    ///
    /// Incoming mapping keys go through `key_inverse` to recover field names.
    pub fn convert_in(
        &self,
        descriptor: &TypeDescriptor,
        value: &Value,
        key_inverse: &KeyTransform,
    ) -> Result<Native, MewError> {
        self.input(descriptor, value, key_inverse, &Path::Root)
    }

    fn out(
        &self,
        native: &Native,
        descriptor: &TypeDescriptor,
        keys: &KeyTransform,
        path: &Path<'_>,
    ) -> Result<Value, MewError> {
        match (descriptor, native) {
            (TypeDescriptor::Scalar(kind), Native::Scalar(scalar)) => {
                if scalar.kind() != *kind {
                    return Err(MewError::native_mismatch(
                        path.to_string(),
                        kind.name(),
                        scalar.kind().name(),
                    ));
                }
                let codec = self
                    .registry
                    .codec(*kind)
                    .ok_or_else(|| MewError::unknown_scalar_kind(*kind))?;
                (codec.serialize)(scalar)
                    .map_err(|e| codec_error(e, *kind, &path.to_string(), &Value::Null, Some(scalar)))
            }
            (TypeDescriptor::Enumeration { name, members }, Native::Member(member)) => members
                .iter()
                .find(|m| m.name == *member)
                .map(|m| m.value.clone())
                .ok_or_else(|| {
                    MewError::native_mismatch(
                        path.to_string(),
                        format!("member of enum {}", name),
                        member.as_str(),
                    )
                }),
            (TypeDescriptor::Record { name, fields }, Native::Record(record)) => {
                let mut mapping = Mapping::with_capacity(fields.len());
                for field in fields {
                    let field_path = Path::Field(path, &field.name);
                    let child = record.get(&field.name).ok_or_else(|| {
                        MewError::native_mismatch(
                            field_path.to_string(),
                            format!("field of record {}", name),
                            "nothing",
                        )
                    })?;
                    let value = self.out(child, &field.descriptor, keys, &field_path)?;
                    let key = keys.apply(&field.name);
                    if mapping.contains_key(&key) {
                        return Err(MewError::key_collision(path.to_string(), key));
                    }
                    mapping.insert(key, value);
                }
                Ok(Value::Mapping(mapping))
            }
            (TypeDescriptor::Tuple { name, fields }, Native::Record(record)) => fields
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    let element_path = Path::Index(path, i);
                    let child = record.get(&field.name).ok_or_else(|| {
                        MewError::native_mismatch(
                            element_path.to_string(),
                            format!("field {} of tuple {}", field.name, name),
                            "nothing",
                        )
                    })?;
                    self.out(child, &field.descriptor, keys, &element_path)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            (TypeDescriptor::Sequence(element), Native::Sequence(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.out(item, element, keys, &Path::Index(path, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            (TypeDescriptor::Union(alternatives), Native::Alternative { index, value }) => {
                let alternative = alternatives.get(*index).ok_or_else(|| {
                    MewError::native_mismatch(
                        path.to_string(),
                        descriptor.to_string(),
                        format!("alternative #{}", index),
                    )
                })?;
                self.out(value, alternative, keys, path)
            }
            (TypeDescriptor::Unsupported { name }, _) => {
                Err(MewError::not_supported(name.as_str(), vec![name.clone()]))
            }
            (expected, actual) => Err(MewError::native_mismatch(
                path.to_string(),
                expected.to_string(),
                actual.shape(),
            )),
        }
    }

    fn input(
        &self,
        descriptor: &TypeDescriptor,
        value: &Value,
        keys: &KeyTransform,
        path: &Path<'_>,
    ) -> Result<Native, MewError> {
        match descriptor {
            TypeDescriptor::Scalar(kind) => self.scalar_in(*kind, value, path),
            TypeDescriptor::Enumeration { name, members } => members
                .iter()
                .find(|m| m.value == *value)
                .map(|m| Native::Member(m.name.clone()))
                .ok_or_else(|| MewError::unknown_enum_value(path.to_string(), name.as_str(), value.clone())),
            TypeDescriptor::Record { name, fields } => {
                let mapping = value.as_mapping().ok_or_else(|| {
                    MewError::type_mismatch(path.to_string(), descriptor.to_string(), value.clone())
                })?;
                // (field name, wire key, value) for every incoming entry
                let mut incoming: Vec<(String, &str, &Value)> = mapping
                    .iter()
                    .map(|(k, v)| (keys.apply(k), k.as_str(), v))
                    .collect();
                for (i, (field_name, _, _)) in incoming.iter().enumerate() {
                    if incoming[..i].iter().any(|(n, _, _)| n == field_name) {
                        return Err(MewError::key_collision(path.to_string(), field_name.as_str()));
                    }
                }

                let mut record = NativeRecord::with_capacity(fields.len());
                for field in fields {
                    let field_path = Path::Field(path, &field.name);
                    match incoming.iter().position(|(n, _, _)| *n == field.name) {
                        Some(i) => {
                            let (_, _, child) = incoming.remove(i);
                            let native = self.input(&field.descriptor, child, keys, &field_path)?;
                            record.insert(field.name.as_str(), native);
                        }
                        None if field.has_default => {}
                        None if field.descriptor.is_optional() => {
                            let native = self.input(&field.descriptor, &Value::Null, keys, &field_path)?;
                            record.insert(field.name.as_str(), native);
                        }
                        None => {
                            return Err(MewError::missing_field(path.to_string(), name.as_str(), field.name.as_str()))
                        }
                    }
                }
                if let Some((_, key, _)) = incoming.first() {
                    return Err(MewError::unknown_field(path.to_string(), name.as_str(), *key));
                }
                Ok(Native::Record(record))
            }
            TypeDescriptor::Tuple { fields, .. } => {
                let items = value
                    .as_sequence()
                    .filter(|items| items.len() == fields.len())
                    .ok_or_else(|| {
                        MewError::type_mismatch(path.to_string(), descriptor.to_string(), value.clone())
                    })?;
                let mut record = NativeRecord::with_capacity(fields.len());
                for (i, (field, item)) in fields.iter().zip(items).enumerate() {
                    let native = self.input(&field.descriptor, item, keys, &Path::Index(path, i))?;
                    record.insert(field.name.as_str(), native);
                }
                Ok(Native::Record(record))
            }
            TypeDescriptor::Sequence(element) => {
                let items = value.as_sequence().ok_or_else(|| {
                    MewError::type_mismatch(path.to_string(), descriptor.to_string(), value.clone())
                })?;
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.input(element, item, keys, &Path::Index(path, i)))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Native::Sequence)
            }
            TypeDescriptor::Union(alternatives) => {
                let mut tried = Vec::with_capacity(alternatives.len());
                for (index, alternative) in alternatives.iter().enumerate() {
                    match self.input(alternative, value, keys, path) {
                        Ok(native) => return Ok(Native::alternative(index, native)),
                        Err(e) if e.is_mismatch() => {
                            log::trace!("{}: alternative {} rejected: {}", path, alternative, e.kind());
                            tried.push(alternative.to_string());
                        }
                        Err(e) => return Err(e),
                    }
                }
                Err(MewError::no_matching_alternative(path.to_string(), tried, value.clone()))
            }
            TypeDescriptor::Unsupported { name } => {
                Err(MewError::not_supported(name.as_str(), vec![name.clone()]))
            }
        }
    }

    fn scalar_in(&self, kind: ScalarKind, value: &Value, path: &Path<'_>) -> Result<Native, MewError> {
        let codec = self
            .registry
            .codec(kind)
            .ok_or_else(|| MewError::unknown_scalar_kind(kind))?;
        (codec.deserialize)(value)
            .map(Native::Scalar)
            .map_err(|e| codec_error(e, kind, &path.to_string(), value, None))
    }
}
