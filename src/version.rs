//! Version discovery by marker scan.

use crate::constants::VERSION_MARKER;
use crate::error::{Error, Result};
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A trimmed, non-empty version token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionString(String);

impl VersionString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the version literal from a single line, if the marker is present.
///
/// The literal is everything after the marker up to the end of the line,
/// minus the one closing-quote character, trimmed. No further parsing is
/// attempted: trailing text after the quote stays in the result.
pub fn parse_version_line(line: &str) -> Option<&str> {
    let index = line.find(VERSION_MARKER)?;
    let line = line.trim_end_matches(['\n', '\r']);
    let rest = line.get(index + VERSION_MARKER.len()..)?;
    let end = rest.char_indices().last().map_or(0, |(i, _)| i);
    Some(rest[..end].trim())
}

/// Scans `path` line by line and returns the version following the first
/// occurrence of the marker. Later markers are never considered.
///
/// # Errors
/// * `Error::ReadError` if the file cannot be opened or read
/// * `Error::VersionFormatError` if no line carries the marker, or the
///   literal after it is empty
pub fn extract_version<P: AsRef<Path>>(path: P) -> Result<VersionString> {
    let path = path.as_ref();
    let read_error = |source: std::io::Error| Error::ReadError {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(read_error)?);
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(read_error)?;
        if let Some(version) = parse_version_line(&line) {
            debug!("Found version marker at {}:{}", path.display(), number + 1);
            if version.is_empty() {
                break;
            }
            return Ok(VersionString(version.to_string()));
        }
    }

    Err(Error::VersionFormatError {
        path: path.to_path_buf(),
    })
}
