//! mew error types.
//!
//! This module provides error handling using `exn` for context-aware errors
//! while keeping a stable `error_type()` string per error kind.

use std::fmt;

use super::descriptor::ScalarKind;
use super::value::Value;

/// Error kind enum for mew operations.
///
/// Every conversion failure carries the path of the failing subtree
/// (for example `$.lectures[2].teacher.address.door_number`).
#[derive(Debug, Clone)]
pub enum ErrorKind {
    /// The type graph contains types that cannot be represented.
    NotSupported {
        type_name: String,
        offending: Vec<String>,
    },
    /// An intermediate value has the wrong shape for its declared type.
    TypeMismatch {
        path: String,
        expected: String,
        actual: Value,
    },
    /// A required record field is absent from the mapping.
    MissingField {
        path: String,
        record: String,
        field: String,
    },
    /// A mapping key does not name any field of the record.
    UnknownField {
        path: String,
        record: String,
        key: String,
    },
    /// Two distinct keys land on the same key after a key transform,
    /// either field names on the way out or wire keys on the way in.
    KeyCollision { path: String, key: String },
    /// A wire value matches no enumeration member.
    UnknownEnumValue {
        path: String,
        enumeration: String,
        value: Value,
    },
    /// Every union alternative failed.
    NoMatchingUnionAlternative {
        path: String,
        alternatives: Vec<String>,
        value: Value,
    },
    /// Identifier/date/time text failed to parse.
    MalformedScalarLiteral {
        path: String,
        kind: ScalarKind,
        raw: String,
        reason: String,
    },
    /// The scalar registry has no codec for a kind.
    UnknownScalarKind { kind: ScalarKind },
    /// A native value does not have the shape its descriptor declares.
    NativeMismatch {
        path: String,
        expected: String,
        actual: String,
    },
    /// Text format outside `{json, yaml}`.
    UnsupportedFormat { requested: String },
    /// JSON parsing or rendering error.
    JsonError { message: String },
    /// YAML parsing or rendering error.
    YamlError { message: String },
}

impl ErrorKind {
    /// Get the error type as a string.
    ///
    /// These strings are stable.
    pub fn error_type(&self) -> &'static str {
        match self {
            ErrorKind::NotSupported { .. } => "not_supported",
            ErrorKind::TypeMismatch { .. } => "type_mismatch",
            ErrorKind::MissingField { .. } => "missing_field",
            ErrorKind::UnknownField { .. } => "unknown_field",
            ErrorKind::KeyCollision { .. } => "key_collision",
            ErrorKind::UnknownEnumValue { .. } => "unknown_enum_value",
            ErrorKind::NoMatchingUnionAlternative { .. } => "no_matching_union_alternative",
            ErrorKind::MalformedScalarLiteral { .. } => "malformed_scalar_literal",
            ErrorKind::UnknownScalarKind { .. } => "unknown_scalar_kind",
            ErrorKind::NativeMismatch { .. } => "native_mismatch",
            ErrorKind::UnsupportedFormat { .. } => "unsupported_format",
            ErrorKind::JsonError { .. } => "json_error",
            ErrorKind::YamlError { .. } => "yaml_error",
        }
    }

    /// Structural mismatch between an intermediate value and a descriptor.
    ///
    /// This is the only failure class a union retries on; every other kind
    /// aborts the conversion immediately.
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            ErrorKind::TypeMismatch { .. }
                | ErrorKind::MissingField { .. }
                | ErrorKind::UnknownField { .. }
                | ErrorKind::UnknownEnumValue { .. }
                | ErrorKind::NoMatchingUnionAlternative { .. }
                | ErrorKind::MalformedScalarLiteral { .. }
        )
    }

    /// Path of the failing subtree, for conversion errors.
    pub fn path(&self) -> Option<&str> {
        match self {
            ErrorKind::TypeMismatch { path, .. }
            | ErrorKind::MissingField { path, .. }
            | ErrorKind::UnknownField { path, .. }
            | ErrorKind::KeyCollision { path, .. }
            | ErrorKind::UnknownEnumValue { path, .. }
            | ErrorKind::NoMatchingUnionAlternative { path, .. }
            | ErrorKind::MalformedScalarLiteral { path, .. }
            | ErrorKind::NativeMismatch { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotSupported {
                type_name,
                offending,
            } => write!(
                f,
                "{} is not serializable, unsupported types: {}",
                type_name,
                offending.join(", ")
            ),
            ErrorKind::TypeMismatch {
                path,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch at {}: expected {}, got {} {}",
                path,
                expected,
                actual.kind(),
                actual
            ),
            ErrorKind::MissingField {
                path,
                record,
                field,
            } => write!(f, "missing field `{}` of {} at {}", field, record, path),
            ErrorKind::UnknownField { path, record, key } => {
                write!(f, "unknown key `{}` for {} at {}", key, record, path)
            }
            ErrorKind::KeyCollision { path, key } => {
                write!(f, "more than one key maps to `{}` at {}", key, path)
            }
            ErrorKind::UnknownEnumValue {
                path,
                enumeration,
                value,
            } => write!(
                f,
                "cannot find an item in enum {} with value {} at {}",
                enumeration, value, path
            ),
            ErrorKind::NoMatchingUnionAlternative {
                path,
                alternatives,
                value,
            } => write!(
                f,
                "no alternative of [{}] accepts {} at {}",
                alternatives.join(", "),
                value,
                path
            ),
            ErrorKind::MalformedScalarLiteral {
                path,
                kind,
                raw,
                reason,
            } => write!(f, "malformed {} `{}` at {}: {}", kind, raw, path, reason),
            ErrorKind::UnknownScalarKind { kind } => {
                write!(f, "no codec registered for scalar kind {}", kind)
            }
            ErrorKind::NativeMismatch {
                path,
                expected,
                actual,
            } => write!(
                f,
                "native value at {} does not match its type: expected {}, got {}",
                path, expected, actual
            ),
            ErrorKind::UnsupportedFormat { requested } => {
                write!(f, "unsupported format `{}` (expected json or yaml)", requested)
            }
            ErrorKind::JsonError { message } => write!(f, "json error: {}", message),
            ErrorKind::YamlError { message } => write!(f, "yaml error: {}", message),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Main error type for mew operations.
///
/// This wraps `exn::Exn<ErrorKind>` to provide context-aware error handling
/// while keeping the stable `error_type()` interface.
#[derive(Debug)]
pub struct MewError(exn::Exn<ErrorKind>);

impl MewError {
    /// Create a new error from an error kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self(exn::Exn::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_error()
    }

    /// Get the error type as a string.
    pub fn error_type(&self) -> &'static str {
        self.kind().error_type()
    }

    /// Whether a union may retry another alternative after this error.
    pub fn is_mismatch(&self) -> bool {
        self.kind().is_mismatch()
    }

    // Convenience constructors

    /// Create a "not supported" error.
    pub fn not_supported(type_name: impl Into<String>, offending: Vec<String>) -> Self {
        Self::new(ErrorKind::NotSupported {
            type_name: type_name.into(),
            offending,
        })
    }

    /// Create a "type mismatch" error.
    pub fn type_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<Value>,
    ) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        })
    }

    /// Create a "missing field" error.
    pub fn missing_field(
        path: impl Into<String>,
        record: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::MissingField {
            path: path.into(),
            record: record.into(),
            field: field.into(),
        })
    }

    /// Create an "unknown field" error.
    pub fn unknown_field(
        path: impl Into<String>,
        record: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::UnknownField {
            path: path.into(),
            record: record.into(),
            key: key.into(),
        })
    }

    /// Create a "key collision" error.
    pub fn key_collision(path: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(ErrorKind::KeyCollision {
            path: path.into(),
            key: key.into(),
        })
    }

    /// Create an "unknown enum value" error.
    pub fn unknown_enum_value(
        path: impl Into<String>,
        enumeration: impl Into<String>,
        value: Value,
    ) -> Self {
        Self::new(ErrorKind::UnknownEnumValue {
            path: path.into(),
            enumeration: enumeration.into(),
            value,
        })
    }

    /// Create a "no matching union alternative" error.
    pub fn no_matching_alternative(
        path: impl Into<String>,
        alternatives: Vec<String>,
        value: Value,
    ) -> Self {
        Self::new(ErrorKind::NoMatchingUnionAlternative {
            path: path.into(),
            alternatives,
            value,
        })
    }

    /// Create a "malformed scalar literal" error.
    pub fn malformed_scalar(
        path: impl Into<String>,
        kind: ScalarKind,
        raw: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::MalformedScalarLiteral {
            path: path.into(),
            kind,
            raw: raw.into(),
            reason: reason.into(),
        })
    }

    /// Create an "unknown scalar kind" error.
    pub fn unknown_scalar_kind(kind: ScalarKind) -> Self {
        Self::new(ErrorKind::UnknownScalarKind { kind })
    }

    /// Create a "native mismatch" error.
    pub fn native_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::NativeMismatch {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        })
    }

    /// Create an "unsupported format" error.
    pub fn unsupported_format(requested: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedFormat {
            requested: requested.into(),
        })
    }

    /// Check if this is a NotSupported error.
    pub fn is_not_supported(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotSupported { .. })
    }

    /// Check if this is a TypeMismatch error.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind(), ErrorKind::TypeMismatch { .. })
    }

    /// Check if this is a MissingField error.
    pub fn is_missing_field(&self) -> bool {
        matches!(self.kind(), ErrorKind::MissingField { .. })
    }

    /// Check if this is an UnsupportedFormat error.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self.kind(), ErrorKind::UnsupportedFormat { .. })
    }
}

impl fmt::Display for MewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

impl std::error::Error for MewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        // ErrorKind is the root cause, no further source
        None
    }
}

impl From<ErrorKind> for MewError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<serde_json::Error> for MewError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorKind::JsonError {
            message: e.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for MewError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::new(ErrorKind::YamlError {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_type_strings() {
        assert_eq!(MewError::not_supported("Foo", vec![]).error_type(), "not_supported");
        assert_eq!(
            MewError::type_mismatch("$", "integer", "5").error_type(),
            "type_mismatch"
        );
        assert_eq!(
            MewError::unknown_scalar_kind(ScalarKind::Uuid).error_type(),
            "unknown_scalar_kind"
        );
        assert_eq!(MewError::unsupported_format("xml").error_type(), "unsupported_format");
    }

    #[test]
    fn test_mismatch_class() {
        assert!(MewError::type_mismatch("$", "integer", "5").is_mismatch());
        assert!(MewError::missing_field("$", "Address", "id").is_mismatch());
        assert!(MewError::malformed_scalar("$", ScalarKind::Uuid, "x", "bad").is_mismatch());
        assert!(!MewError::unknown_scalar_kind(ScalarKind::Date).is_mismatch());
        assert!(!MewError::native_mismatch("$", "string", "integer").is_mismatch());
        assert!(!MewError::key_collision("$", "Id").is_mismatch());
    }

    #[test]
    fn test_display_includes_path_and_value() {
        let err = MewError::type_mismatch("$.door_number", "integer", 5.5);
        let msg = err.kind().to_string();
        assert!(msg.contains("$.door_number"));
        assert!(msg.contains("expected integer"));
        assert!(msg.contains("5.5"));
        assert_eq!(err.kind().path(), Some("$.door_number"));
    }

    #[test]
    fn test_not_supported_lists_every_type() {
        let err = MewError::not_supported("Widget", vec!["Widget.a: fn()".into(), "Widget.b: fn()".into()]);
        let msg = err.kind().to_string();
        assert!(msg.contains("Widget.a: fn()"));
        assert!(msg.contains("Widget.b: fn()"));
    }
}
