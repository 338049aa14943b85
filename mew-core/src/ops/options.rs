//! Per-call conversion options.

use crate::helpers::case::{KeyCase, KeyTransform};
use crate::helpers::format::Format;

/// Options for a single text conversion.
///
/// The key transforms are a caller-supplied pair; nothing checks that
/// `key_inverse` undoes `key_transform`.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Text format (default JSON).
    pub format: Format,
    /// Applied to record field names when serializing.
    pub key_transform: KeyTransform,
    /// Applied to incoming keys when deserializing.
    pub key_inverse: KeyTransform,
    /// Indent JSON output. YAML is always block style.
    pub pretty: bool,
}

impl Options {
    pub fn json() -> Self {
        Self::default()
    }

    pub fn yaml() -> Self {
        Self::default().with_format(Format::Yaml)
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Use a forward/inverse key transform pair.
    pub fn with_keys(mut self, forward: KeyTransform, inverse: KeyTransform) -> Self {
        self.key_transform = forward;
        self.key_inverse = inverse;
        self
    }

    /// Use one of the built-in key conventions.
    pub fn with_key_case(self, case: KeyCase) -> Self {
        self.with_keys(case.forward(), case.inverse())
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.format, Format::Json);
        assert!(options.key_transform.is_identity());
        assert!(options.key_inverse.is_identity());
        assert!(!options.pretty);
    }

    #[test]
    fn test_builder() {
        let options = Options::yaml().with_key_case(KeyCase::Pascal).pretty();
        assert_eq!(options.format, Format::Yaml);
        assert_eq!(options.key_transform.apply("door_number"), "DoorNumber");
        assert_eq!(options.key_inverse.apply("DoorNumber"), "door_number");
        assert!(options.pretty);
    }
}
