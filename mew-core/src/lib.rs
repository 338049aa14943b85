//! mew core library
//!
//! Schema-driven conversion between typed Rust values and JSON/YAML text.
//! A declared type is classified once into a [`TypeDescriptor`]; values are
//! then walked against that descriptor into a format-neutral [`Value`]
//! tree, which is what the text encoders read and write.
//!
//! # Architecture
//!
//! - `types`: Core data types (Value, TypeDescriptor, Native, MewError)
//! - `schema`: `Describe`/`Serializable` traits and the declaration macros
//! - `ops`: High-level operations (register, to_text, from_text)
//! - `helpers`: Scalar codecs, the structural converter, key transforms, text formats
//!
//! # Example
//!
//! ```
//! use mew_core::{register, Options, KeyCase};
//!
//! mew_core::record! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct Address {
//!         pub door_number: i64,
//!         pub street_name: String,
//!     }
//! }
//!
//! let address = Address { door_number: 5, street_name: "Oak".into() };
//! let options = Options::json().with_key_case(KeyCase::Pascal);
//! let registered = register::<Address>().unwrap();
//! let text = registered.to_text(&address, &options).unwrap();
//! assert_eq!(text, r#"{"DoorNumber":5,"StreetName":"Oak"}"#);
//! assert_eq!(registered.from_text(&text, &options).unwrap(), address);
//! ```

pub mod types;
pub mod schema;
pub mod ops;
pub mod helpers;

// Re-export commonly used types at crate root
pub use types::{
    EnumMember,
    ErrorKind,
    Field,
    Mapping,
    MewError,
    Native,
    NativeRecord,
    Number,
    Scalar,
    ScalarKind,
    TypeDescriptor,
    Value,
};

pub use schema::{Describe, Serializable};

// Re-export operations at crate root
pub use ops::{from_text, register, register_with, to_text, Options, Registered};

pub use helpers::case::{
    from_camel_case, from_pascal_case, to_camel_case, to_pascal_case, transform_keys, KeyCase,
    KeyTransform,
};
pub use helpers::convert::Converter;
pub use helpers::format::{parse, render, render_with, Format};
pub use helpers::registry::{CodecError, ScalarCodec, ScalarRegistry};
