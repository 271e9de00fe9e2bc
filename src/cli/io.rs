//! JSON output for the CLI
//!
//! One JSON document per line on stdout, UTF-8.

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write a JSON document to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_json_to(&mut lock, value)
}

/// Write a JSON document and a newline to `writer`
pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ErrorResponse;

    #[test]
    fn test_write_json_to() {
        let mut out = Vec::new();
        write_json_to(&mut out, &ErrorResponse::new("Query failed: boom")).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"error\":\"Query failed: boom\"}\n"
        );
    }

    #[test]
    fn test_empty_result_set_is_empty_array() {
        let mut out = Vec::new();
        let rows: crate::db::ResultSet = Vec::new();
        write_json_to(&mut out, &rows).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
