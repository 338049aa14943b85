//! mew command implementations.
//!
//! Each subcommand is implemented in its own module and delegates
//! to mew-core for the conversion itself.

pub mod case;
pub mod convert;

use std::io;

use clap::ValueEnum;
use mew_core::KeyTransform;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// mew core error.
    #[error("{0}")]
    Mew(#[from] mew_core::MewError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Named key rewrites available on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Rewrite {
    /// snake_case -> PascalCase
    ToPascal,
    /// PascalCase -> snake_case
    FromPascal,
    /// snake_case -> camelCase
    ToCamel,
    /// camelCase -> snake_case
    FromCamel,
}

impl Rewrite {
    pub fn apply(self, name: &str) -> String {
        match self {
            Rewrite::ToPascal => mew_core::to_pascal_case(name),
            Rewrite::FromPascal => mew_core::from_pascal_case(name),
            Rewrite::ToCamel => mew_core::to_camel_case(name),
            Rewrite::FromCamel => mew_core::from_camel_case(name),
        }
    }

    pub fn transform(self) -> KeyTransform {
        KeyTransform::new(move |name| self.apply(name))
    }
}
