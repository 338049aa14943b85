//! mew convert command.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use fs_err as fs;
use mew_core::{parse, render_with, transform_keys, Format};

use super::{Result, Rewrite};

/// Arguments of the convert command, already parsed by clap.
#[derive(Debug)]
pub struct ConvertArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub from: String,
    pub to: String,
    pub keys: Option<Rewrite>,
    pub pretty: bool,
}

/// Run the convert command.
pub fn run(args: ConvertArgs) -> Result<()> {
    // Both names are checked before any input is read.
    let from = Format::from_name(&args.from)?;
    let to = Format::from_name(&args.to)?;

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let output = convert(&text, from, to, args.keys, args.pretty)?;
    match &args.output {
        Some(path) => fs::write(path, output)?,
        None => io::stdout().write_all(output.as_bytes())?,
    }
    Ok(())
}

/// Re-encode a document, rewriting keys if asked. The result ends in a newline.
pub fn convert(
    text: &str,
    from: Format,
    to: Format,
    keys: Option<Rewrite>,
    pretty: bool,
) -> Result<String> {
    let mut value = parse(text, from)?;
    if let Some(rewrite) = keys {
        log::debug!("rewriting keys with {:?}", rewrite);
        value = transform_keys(&value, &rewrite.transform())?;
    }
    let mut output = render_with(&value, to, pretty)?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}
