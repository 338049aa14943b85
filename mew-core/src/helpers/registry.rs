//! Scalar codec registry.
//!
//! Maps each [`ScalarKind`] to a pair of pure functions converting between a
//! native [`Scalar`] and an intermediate [`Value`]. The process-wide registry
//! is built once and is read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use crate::types::{MewError, Number, Scalar, ScalarKind, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Failure of a single codec, before the converter adds path context.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// The intermediate value has the wrong shape for this kind.
    Shape,
    /// The text could not be parsed as this kind.
    Malformed { raw: String, reason: String },
    /// The native scalar was handed to the wrong codec.
    Native,
}

pub type SerializeFn = fn(&Scalar) -> Result<Value, CodecError>;
pub type DeserializeFn = fn(&Value) -> Result<Scalar, CodecError>;

/// Serialize/deserialize pair for one scalar kind.
#[derive(Debug, Clone, Copy)]
pub struct ScalarCodec {
    pub serialize: SerializeFn,
    pub deserialize: DeserializeFn,
}

impl ScalarCodec {
    pub const fn new(serialize: SerializeFn, deserialize: DeserializeFn) -> Self {
        Self {
            serialize,
            deserialize,
        }
    }
}

/// Registry of scalar codecs, keyed by kind.
#[derive(Debug, Clone, Default)]
pub struct ScalarRegistry {
    codecs: HashMap<ScalarKind, ScalarCodec>,
}

impl ScalarRegistry {
    /// A registry with no codecs at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with the built-in codec for every [`ScalarKind`].
    pub fn standard() -> Self {
        ScalarKind::ALL
            .iter()
            .fold(Self::empty(), |registry, kind| registry.with_codec(*kind, builtin(*kind)))
    }

    /// The process-wide standard registry.
    pub fn global() -> &'static ScalarRegistry {
        static GLOBAL: OnceLock<ScalarRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ScalarRegistry::standard)
    }

    /// Add or replace the codec for a kind.
    pub fn with_codec(mut self, kind: ScalarKind, codec: ScalarCodec) -> Self {
        self.codecs.insert(kind, codec);
        self
    }

    /// Remove the codec for a kind.
    pub fn without(mut self, kind: ScalarKind) -> Self {
        self.codecs.remove(&kind);
        self
    }

    pub fn codec(&self, kind: ScalarKind) -> Option<&ScalarCodec> {
        self.codecs.get(&kind)
    }

    pub fn contains(&self, kind: ScalarKind) -> bool {
        self.codecs.contains_key(&kind)
    }

    /// Serialize a scalar, looking the codec up by its runtime kind.
    pub fn serialize(&self, scalar: &Scalar) -> Result<Value, MewError> {
        let kind = scalar.kind();
        let codec = self.codec(kind).ok_or_else(|| MewError::unknown_scalar_kind(kind))?;
        (codec.serialize)(scalar).map_err(|e| codec_error(e, kind, "$", &Value::Null, Some(scalar)))
    }

    /// Deserialize a value as the given declared kind.
    pub fn deserialize(&self, kind: ScalarKind, value: &Value) -> Result<Scalar, MewError> {
        let codec = self.codec(kind).ok_or_else(|| MewError::unknown_scalar_kind(kind))?;
        (codec.deserialize)(value).map_err(|e| codec_error(e, kind, "$", value, None))
    }
}

/// Attach path context to a codec failure.
pub(crate) fn codec_error(
    error: CodecError,
    kind: ScalarKind,
    path: &str,
    value: &Value,
    native: Option<&Scalar>,
) -> MewError {
    match error {
        CodecError::Shape => MewError::type_mismatch(path, kind.name(), value.clone()),
        CodecError::Malformed { raw, reason } => MewError::malformed_scalar(path, kind, raw, reason),
        CodecError::Native => MewError::native_mismatch(
            path,
            kind.name(),
            native.map(|s| s.kind().name()).unwrap_or("unknown"),
        ),
    }
}

fn builtin(kind: ScalarKind) -> ScalarCodec {
    match kind {
        ScalarKind::Null => ScalarCodec::new(null_out, null_in),
        ScalarKind::Bool => ScalarCodec::new(bool_out, bool_in),
        ScalarKind::Integer => ScalarCodec::new(integer_out, integer_in),
        ScalarKind::Float => ScalarCodec::new(float_out, float_in),
        ScalarKind::String => ScalarCodec::new(string_out, string_in),
        ScalarKind::Uuid => ScalarCodec::new(uuid_out, uuid_in),
        ScalarKind::Date => ScalarCodec::new(date_out, date_in),
        ScalarKind::Time => ScalarCodec::new(time_out, time_in),
        ScalarKind::DateTime => ScalarCodec::new(datetime_out, datetime_in),
        ScalarKind::LocalDateTime => ScalarCodec::new(local_datetime_out, local_datetime_in),
    }
}

fn malformed(raw: &str, reason: impl ToString) -> CodecError {
    CodecError::Malformed {
        raw: raw.to_string(),
        reason: reason.to_string(),
    }
}

fn text(value: &Value) -> Result<&str, CodecError> {
    value.as_str().ok_or(CodecError::Shape)
}

fn null_out(scalar: &Scalar) -> Result<Value, CodecError> {
    match scalar {
        Scalar::Null => Ok(Value::Null),
        _ => Err(CodecError::Native),
    }
}

fn null_in(value: &Value) -> Result<Scalar, CodecError> {
    match value {
        Value::Null => Ok(Scalar::Null),
        _ => Err(CodecError::Shape),
    }
}

fn bool_out(scalar: &Scalar) -> Result<Value, CodecError> {
    match scalar {
        Scalar::Bool(b) => Ok(Value::Bool(*b)),
        _ => Err(CodecError::Native),
    }
}

fn bool_in(value: &Value) -> Result<Scalar, CodecError> {
    value.as_bool().map(Scalar::Bool).ok_or(CodecError::Shape)
}

fn integer_out(scalar: &Scalar) -> Result<Value, CodecError> {
    match scalar {
        Scalar::Integer(i) => Ok(Value::Number(Number::Int(*i))),
        _ => Err(CodecError::Native),
    }
}

// Floats are rejected, even integral ones.
fn integer_in(value: &Value) -> Result<Scalar, CodecError> {
    value.as_i64().map(Scalar::Integer).ok_or(CodecError::Shape)
}

fn float_out(scalar: &Scalar) -> Result<Value, CodecError> {
    match scalar {
        Scalar::Float(f) => Ok(Value::Number(Number::Float(*f))),
        _ => Err(CodecError::Native),
    }
}

// Integers widen to floats.
fn float_in(value: &Value) -> Result<Scalar, CodecError> {
    value.as_f64().map(Scalar::Float).ok_or(CodecError::Shape)
}

fn string_out(scalar: &Scalar) -> Result<Value, CodecError> {
    match scalar {
        Scalar::String(s) => Ok(Value::String(s.clone())),
        _ => Err(CodecError::Native),
    }
}

fn string_in(value: &Value) -> Result<Scalar, CodecError> {
    text(value).map(|s| Scalar::String(s.to_string()))
}

// Format as "10fb6968-6b54-44c8-9365-e0b3934ae156".
fn uuid_out(scalar: &Scalar) -> Result<Value, CodecError> {
    match scalar {
        Scalar::Uuid(u) => Ok(Value::String(u.hyphenated().to_string())),
        _ => Err(CodecError::Native),
    }
}

fn uuid_in(value: &Value) -> Result<Scalar, CodecError> {
    let raw = text(value)?;
    if raw.len() != 36 {
        return Err(malformed(raw, "expected the 36-character hyphenated form"));
    }
    if raw.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(malformed(raw, "expected lowercase hex digits"));
    }
    Uuid::parse_str(raw)
        .map(Scalar::Uuid)
        .map_err(|e| malformed(raw, e))
}

fn date_out(scalar: &Scalar) -> Result<Value, CodecError> {
    match scalar {
        Scalar::Date(d) => Ok(Value::String(d.format(DATE_FORMAT).to_string())),
        _ => Err(CodecError::Native),
    }
}

fn date_in(value: &Value) -> Result<Scalar, CodecError> {
    let raw = text(value)?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Scalar::Date)
        .map_err(|e| malformed(raw, e))
}

fn time_out(scalar: &Scalar) -> Result<Value, CodecError> {
    match scalar {
        Scalar::Time(t) => Ok(Value::String(t.format(TIME_FORMAT).to_string())),
        _ => Err(CodecError::Native),
    }
}

fn time_in(value: &Value) -> Result<Scalar, CodecError> {
    let raw = text(value)?;
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .map(Scalar::Time)
        .map_err(|e| malformed(raw, e))
}

// ISO-8601 with offset, e.g. "2021-03-04T05:06:07.000123+01:00".
fn datetime_out(scalar: &Scalar) -> Result<Value, CodecError> {
    match scalar {
        Scalar::DateTime(dt) => Ok(Value::String(dt.to_rfc3339())),
        _ => Err(CodecError::Native),
    }
}

fn datetime_in(value: &Value) -> Result<Scalar, CodecError> {
    let raw = text(value)?;
    DateTime::parse_from_rfc3339(raw)
        .map(Scalar::DateTime)
        .map_err(|e| malformed(raw, e))
}

fn local_datetime_out(scalar: &Scalar) -> Result<Value, CodecError> {
    match scalar {
        Scalar::LocalDateTime(dt) => Ok(Value::String(dt.format(LOCAL_DATETIME_FORMAT).to_string())),
        _ => Err(CodecError::Native),
    }
}

fn local_datetime_in(value: &Value) -> Result<Scalar, CodecError> {
    let raw = text(value)?;
    NaiveDateTime::parse_from_str(raw, LOCAL_DATETIME_FORMAT)
        .map(Scalar::LocalDateTime)
        .map_err(|e| malformed(raw, e))
}
