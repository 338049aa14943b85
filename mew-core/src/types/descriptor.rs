//! Type descriptors: the classified shape of a declared type.

use std::fmt;

use super::value::Value;

/// Atomic wire-representable kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// The unit / null type.
    Null,
    Bool,
    Integer,
    Float,
    String,
    /// Hyphenated UUID.
    Uuid,
    /// Calendar date (`YYYY-MM-DD`).
    Date,
    /// Time of day (`HH:MM:SS[.ffffff]`).
    Time,
    /// Date-time with a UTC offset.
    DateTime,
    /// Date-time without an offset.
    LocalDateTime,
}

impl ScalarKind {
    /// Every kind, in registry order.
    pub const ALL: [ScalarKind; 10] = [
        ScalarKind::Null,
        ScalarKind::Bool,
        ScalarKind::Integer,
        ScalarKind::Float,
        ScalarKind::String,
        ScalarKind::Uuid,
        ScalarKind::Date,
        ScalarKind::Time,
        ScalarKind::DateTime,
        ScalarKind::LocalDateTime,
    ];

    /// Stable lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::Null => "null",
            ScalarKind::Bool => "bool",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::String => "string",
            ScalarKind::Uuid => "uuid",
            ScalarKind::Date => "date",
            ScalarKind::Time => "time",
            ScalarKind::DateTime => "datetime",
            ScalarKind::LocalDateTime => "local_datetime",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One member of an enumeration: its in-memory name and its wire value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: Value,
}

impl EnumMember {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A named, typed record field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// In-memory field name (before any key transform).
    pub name: String,
    pub descriptor: TypeDescriptor,
    /// Whether the field may be absent from incoming data.
    pub has_default: bool,
}

impl Field {
    /// Create a field from an explicit descriptor.
    pub fn new(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
            has_default: false,
        }
    }

    /// Create a field whose descriptor comes from a Rust type.
    pub fn of<T: crate::schema::Describe>(name: impl Into<String>) -> Self {
        Self::new(name, T::describe())
    }

    /// Mark whether the field has a default value.
    pub fn with_default(mut self, has_default: bool) -> Self {
        self.has_default = has_default;
        self
    }
}

/// Classification of a declared type into exactly one shape.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Scalar(ScalarKind),
    Enumeration {
        name: String,
        members: Vec<EnumMember>,
    },
    /// Named fields in declaration order.
    Record {
        name: String,
        fields: Vec<Field>,
    },
    /// Named fields written positionally, as a sequence in declaration
    /// order. Field names never reach the wire.
    Tuple {
        name: String,
        fields: Vec<Field>,
    },
    Sequence(Box<TypeDescriptor>),
    /// Alternatives in declaration order. `Option<T>` is `Union([T, Null])`.
    Union(Vec<TypeDescriptor>),
    Unsupported {
        name: String,
    },
}

impl TypeDescriptor {
    pub fn scalar(kind: ScalarKind) -> Self {
        TypeDescriptor::Scalar(kind)
    }

    pub fn enumeration(name: impl Into<String>, members: Vec<EnumMember>) -> Self {
        TypeDescriptor::Enumeration {
            name: name.into(),
            members,
        }
    }

    pub fn record(name: impl Into<String>, fields: Vec<Field>) -> Self {
        TypeDescriptor::Record {
            name: name.into(),
            fields,
        }
    }

    pub fn tuple(name: impl Into<String>, fields: Vec<Field>) -> Self {
        TypeDescriptor::Tuple {
            name: name.into(),
            fields,
        }
    }

    pub fn sequence(element: TypeDescriptor) -> Self {
        TypeDescriptor::Sequence(Box::new(element))
    }

    pub fn union(alternatives: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Union(alternatives)
    }

    /// Value-or-absent.
    pub fn optional(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Union(vec![inner, TypeDescriptor::Scalar(ScalarKind::Null)])
    }

    pub fn unsupported(name: impl Into<String>) -> Self {
        TypeDescriptor::Unsupported { name: name.into() }
    }

    /// A union with a null alternative; such fields may be omitted.
    pub fn is_optional(&self) -> bool {
        match self {
            TypeDescriptor::Union(alternatives) => alternatives
                .iter()
                .any(|a| matches!(a, TypeDescriptor::Scalar(ScalarKind::Null))),
            _ => false,
        }
    }

    /// Collect every unsupported type reachable through records, tuples,
    /// sequences and unions.
    ///
    /// Record fields are reported as `Record.field: type`, other positions
    /// by the bare type name. An empty list means the type is representable.
    pub fn find_unsupported(&self) -> Vec<String> {
        let mut offending = Vec::new();
        self.collect_unsupported(None, &mut offending);
        offending
    }

    fn collect_unsupported(&self, owner: Option<&str>, offending: &mut Vec<String>) {
        match self {
            TypeDescriptor::Scalar(_) | TypeDescriptor::Enumeration { .. } => {}
            TypeDescriptor::Record { name, fields } | TypeDescriptor::Tuple { name, fields } => {
                for field in fields {
                    let owner = format!("{}.{}", name, field.name);
                    field.descriptor.collect_unsupported(Some(&owner), offending);
                }
            }
            TypeDescriptor::Sequence(element) => element.collect_unsupported(owner, offending),
            TypeDescriptor::Union(alternatives) => {
                for alternative in alternatives {
                    alternative.collect_unsupported(owner, offending);
                }
            }
            TypeDescriptor::Unsupported { name } => match owner {
                Some(owner) => offending.push(format!("{}: {}", owner, name)),
                None => offending.push(name.clone()),
            },
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Scalar(kind) => write!(f, "{}", kind),
            TypeDescriptor::Enumeration { name, .. } => write!(f, "enum {}", name),
            TypeDescriptor::Record { name, .. } => write!(f, "record {}", name),
            TypeDescriptor::Tuple { name, .. } => write!(f, "tuple {}", name),
            TypeDescriptor::Sequence(element) => write!(f, "list[{}]", element),
            TypeDescriptor::Union(alternatives) => {
                write!(f, "union[")?;
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", alternative)?;
                }
                write!(f, "]")
            }
            TypeDescriptor::Unsupported { name } => write!(f, "unsupported {}", name),
        }
    }
}
