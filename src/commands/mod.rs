//! Subcommand entry points for the `rmdash` binary.

pub mod frame;
pub mod map;
pub mod types;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Write a rendered payload to `path`, or to stdout when no path was
/// given.
pub(crate) fn write_output(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("[commands] Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
