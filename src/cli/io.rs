//! JSON I/O handling for CLI
//!
//! - Input: a single JSON document from a file or stdin
//! - Output: a single pretty-printed JSON document on stdout

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::Serialize;

use super::errors::{CliError, CliResult};
use crate::plan::Profile;

/// Read a profile from `path`, or from stdin when no path is given
pub fn read_profile(path: Option<&Path>) -> CliResult<Profile> {
    let content = match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            CliError::io_error(format!("Failed to read {}: {}", path.display(), e))
        })?,
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };

    parse_profile(&content)
}

/// Parse a profile document; empty input is an empty profile
pub fn parse_profile(content: &str) -> CliResult<Profile> {
    if content.trim().is_empty() {
        return Ok(Profile::empty());
    }
    Ok(serde_json::from_str(content)?)
}

/// Write a value as JSON to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
