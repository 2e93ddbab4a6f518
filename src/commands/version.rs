//! Version command

use crate::config::schema::SCHEMA_VERSION;
use crate::error::Result;

pub fn run() -> Result<()> {
    println!(
        "chief {} (config schema {})",
        env!("CARGO_PKG_VERSION"),
        SCHEMA_VERSION
    );
    Ok(())
}
