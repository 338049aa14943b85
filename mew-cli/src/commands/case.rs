//! mew case command.

use super::{Result, Rewrite};

/// Run the case command: print each name rewritten, one per line.
pub fn run(rewrite: Rewrite, names: &[String]) -> Result<()> {
    for name in names {
        println!("{}", rewrite.apply(name));
    }
    Ok(())
}
