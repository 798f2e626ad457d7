//! Parsing `--follow-location` output.

use crate::error::{Result, RtagsError};
use crate::location::Location;

/// Parse a single `file:row:col:` line.
///
/// Empty output is not an error: rc prints nothing when the symbol under
/// the cursor has no target, and the caller should just do nothing.
pub fn parse_location(output: &str) -> Result<Option<Location>> {
    let line = output.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let body = line
        .strip_suffix(':')
        .ok_or_else(|| malformed(line, "missing trailing colon"))?;

    let fields: Vec<&str> = body.split(':').collect();
    let [file, row, col] = fields.as_slice() else {
        return Err(malformed(line, "expected file:row:col"));
    };
    if file.is_empty() {
        return Err(malformed(line, "empty file name"));
    }

    let row = parse_position(row).ok_or_else(|| malformed(line, "invalid row"))?;
    let col = parse_position(col).ok_or_else(|| malformed(line, "invalid column"))?;

    Location::new(*file, row, col)
        .map(Some)
        .ok_or_else(|| malformed(line, "row and column must be positive"))
}

pub(crate) fn parse_position(field: &str) -> Option<u32> {
    field.trim().parse().ok()
}

fn malformed(line: &str, reason: &str) -> RtagsError {
    RtagsError::MalformedOutput(format!("{}: {:?}", reason, line))
}
