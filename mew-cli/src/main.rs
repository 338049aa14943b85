use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::convert::ConvertArgs;
use commands::Rewrite;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Re-encodes a JSON or YAML document in the other format (or the same one).
    /// Reads stdin when no input file is given
    Convert {
        /// File to read
        input: Option<PathBuf>,
        /// Write here instead of stdout
        #[clap(long, short)]
        output: Option<PathBuf>,
        /// Format of the input (json or yaml)
        #[clap(long, default_value = "json")]
        from: String,
        /// Format of the output (json or yaml)
        #[clap(long, default_value = "yaml")]
        to: String,
        /// Rewrite every mapping key at every depth
        #[clap(long, value_enum)]
        keys: Option<Rewrite>,
        /// Indent JSON output
        #[clap(long)]
        pretty: bool,
    },
    /// Prints each name with the given case rewrite applied, one per line
    Case {
        #[clap(value_enum)]
        rewrite: Rewrite,
        #[clap(required = true)]
        names: Vec<String>,
    },
}

#[derive(Parser)]
#[clap(version, author, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

fn try_main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert {
            input,
            output,
            from,
            to,
            keys,
            pretty,
        } => commands::convert::run(ConvertArgs {
            input,
            output,
            from,
            to,
            keys,
            pretty,
        })?,
        Command::Case { rewrite, names } => commands::case::run(rewrite, &names)?,
    }
    Ok(())
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("Error: {e}");
        ::std::process::exit(1)
    }
}
