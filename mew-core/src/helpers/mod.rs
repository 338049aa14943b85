//! Low-level building blocks used by the high-level operations.

pub mod case;
pub mod convert;
pub mod format;
pub mod registry;
