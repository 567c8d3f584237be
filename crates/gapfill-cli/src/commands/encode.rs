//! The `gapfill encode` command.

use anyhow::Result;

use gapfill_core::codec::encode;

pub fn execute(text: &str) -> Result<()> {
    println!("{}", encode(text));
    Ok(())
}
