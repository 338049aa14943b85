//! JSON and YAML text for intermediate values.

use std::fmt;
use std::str::FromStr;

use crate::types::{ErrorKind, MewError, Number, Value};

/// Supported text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    pub fn name(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }

    /// Parse a format name. Anything but json/yaml is an error, never a default.
    pub fn from_name(name: &str) -> Result<Self, MewError> {
        match name.to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            _ => Err(MewError::unsupported_format(name)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Format {
    type Err = MewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_name(s)
    }
}

/// Render a value as compact JSON or block-style YAML.
pub fn render(value: &Value, format: Format) -> Result<String, MewError> {
    render_with(value, format, false)
}

/// Render a value; `pretty` indents JSON output (YAML is always block style).
///
/// JSON has no literal for NaN or the infinities, so a value holding one is
/// rejected rather than written as `null`. YAML writes them as `.nan`/`.inf`.
pub fn render_with(value: &Value, format: Format, pretty: bool) -> Result<String, MewError> {
    if format == Format::Json {
        if let Some((path, f)) = non_finite(value, "$".to_string()) {
            return Err(MewError::new(ErrorKind::JsonError {
                message: format!("cannot write non-finite float {} at {}", f, path),
            }));
        }
    }
    let text = match format {
        Format::Json if pretty => serde_json::to_string_pretty(value)?,
        Format::Json => serde_json::to_string(value)?,
        Format::Yaml => serde_yaml::to_string(value)?,
    };
    log::debug!("rendered {} bytes of {}", text.len(), format);
    Ok(text)
}

fn non_finite(value: &Value, path: String) -> Option<(String, f64)> {
    match value {
        Value::Number(Number::Float(f)) if !f.is_finite() => Some((path, *f)),
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, item)| non_finite(item, format!("{}[{}]", path, i))),
        Value::Mapping(mapping) => mapping
            .iter()
            .find_map(|(key, item)| non_finite(item, format!("{}.{}", path, key))),
        _ => None,
    }
}

/// Parse text into a value.
pub fn parse(text: &str, format: Format) -> Result<Value, MewError> {
    log::debug!("parsing {} bytes of {}", text.len(), format);
    let value = match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(value)
}
