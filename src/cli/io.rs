//! JSON output for the CLI
//!
//! One JSON object per line on stdout, UTF-8.

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write a value as a single JSON line to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write an error object with per-item details to stdout
pub fn write_error<T: Serialize>(code: &str, message: &str, errors: &[T]) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message,
        "errors": errors,
    });

    write_json(&response)
}
