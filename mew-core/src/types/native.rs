//! Dynamic native values.
//!
//! A [`Native`] is the in-memory side of a conversion: what a Rust value
//! looks like once its static type has been erased into the shapes a
//! [`TypeDescriptor`](super::TypeDescriptor) can describe.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use super::descriptor::ScalarKind;

/// A native scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Uuid(Uuid),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(DateTime<FixedOffset>),
    LocalDateTime(NaiveDateTime),
}

impl Scalar {
    /// The kind used to look up this scalar's codec.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Null => ScalarKind::Null,
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Integer(_) => ScalarKind::Integer,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::String(_) => ScalarKind::String,
            Scalar::Uuid(_) => ScalarKind::Uuid,
            Scalar::Date(_) => ScalarKind::Date,
            Scalar::Time(_) => ScalarKind::Time,
            Scalar::DateTime(_) => ScalarKind::DateTime,
            Scalar::LocalDateTime(_) => ScalarKind::LocalDateTime,
        }
    }
}

/// A native value conforming to some type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Native {
    Scalar(Scalar),
    /// Enumeration member, by in-memory name.
    Member(String),
    Record(NativeRecord),
    Sequence(Vec<Native>),
    /// The value of one union alternative, by position.
    Alternative { index: usize, value: Box<Native> },
}

impl Native {
    pub fn alternative(index: usize, value: Native) -> Self {
        Native::Alternative {
            index,
            value: Box::new(value),
        }
    }

    /// Short description of the shape, used in error messages.
    pub fn shape(&self) -> String {
        match self {
            Native::Scalar(s) => s.kind().to_string(),
            Native::Member(name) => format!("member {}", name),
            Native::Record(_) => "record".to_string(),
            Native::Sequence(_) => "list".to_string(),
            Native::Alternative { index, .. } => format!("alternative #{}", index),
        }
    }
}

impl From<Scalar> for Native {
    fn from(s: Scalar) -> Self {
        Native::Scalar(s)
    }
}

/// Field values of a record, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NativeRecord {
    fields: Vec<(String, Native)>,
}

impl NativeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Append a field value.
    pub fn insert(&mut self, name: impl Into<String>, value: Native) {
        self.fields.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Native> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Remove and return a field value.
    pub fn take(&mut self, name: &str) -> Option<Native> {
        let index = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Native)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}
