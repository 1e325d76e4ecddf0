// src/reporting/mod.rs
//! Report output: colored console text or JSON.

pub mod console;

pub use console::{print_fixes, print_report};

use anyhow::Result;

/// Prints a serializable object as JSON to stdout.
///
/// # Errors
/// Returns error if serialization fails.
pub fn print_json<T: serde::Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{json}");
    Ok(())
}
