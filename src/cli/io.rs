//! JSON output for CLI commands
//!
//! Every command prints exactly one JSON object:
//! `{"status":"ok","data":...}` on success.

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write a success envelope around `data` to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    write_response_to(&mut io::stdout(), data)
}

pub fn write_response_to<W: Write, T: Serialize>(writer: &mut W, data: &T) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data,
    });

    serde_json::to_writer(&mut *writer, &response)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
