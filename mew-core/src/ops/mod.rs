//! High-level mew operations.

mod options;
mod register;

pub use options::Options;
pub use register::{from_text, register, register_with, to_text, Registered};
