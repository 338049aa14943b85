//! Core type definitions for mew.

mod descriptor;
mod error;
mod native;
mod value;

pub use descriptor::{EnumMember, Field, ScalarKind, TypeDescriptor};
pub use error::{ErrorKind, MewError};
pub use native::{Native, NativeRecord, Scalar};
pub use value::{Mapping, Number, Value};
