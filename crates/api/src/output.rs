//! Terminal output
//!
//! Results go to stdout as JSON; hints go to stderr so stdout stays
//! machine-readable.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::{self, Write};

use serde::Serialize;

/// Pretty-print `value` as JSON on stdout.
///
/// # Errors
/// Returns error if serialization or the write fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

/// One-line human hint on stderr.
pub fn hint(message: &str) {
    eprintln!("{message}");
}
