//! Flat-text table codec: one `path|rank|epoch_seconds` record per line.

use std::fmt::Write as _;

use chrono::DateTime;

use crate::entry::Entry;
use crate::error::{Result, ZdirError};

pub const FIELD_DELIMITER: char = '|';

/// Parses a whole data file. Expired entries are dropped; any malformed
/// line, including a blank one or one that is not UTF-8, fails the entire
/// parse.
pub fn parse_table(raw: &[u8], source: &str) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    let body = raw.strip_suffix(b"\n").unwrap_or(raw);
    if body.is_empty() {
        return Ok(entries);
    }
    for (index, line) in body.split(|byte| *byte == b'\n').enumerate() {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let entry = std::str::from_utf8(line)
            .map_err(|err| format!("line is not valid UTF-8: {err}"))
            .and_then(parse_line)
            .map_err(|reason| ZdirError::StoreCorrupt {
                path: source.to_string(),
                line: index + 1,
                reason,
            })?;
        if !entry.is_expired() {
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn parse_line(line: &str) -> std::result::Result<Entry, String> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    let [path, rank, epoch] = fields.as_slice() else {
        return Err(format!("expected 3 fields, found {}", fields.len()));
    };
    let rank = parse_rank(rank)?;
    let epoch = epoch
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("invalid timestamp '{epoch}': {err}"))?;
    let last_access = DateTime::from_timestamp(epoch, 0)
        .ok_or_else(|| format!("timestamp out of range: {epoch}"))?;
    Ok(Entry::new(*path, rank, last_access))
}

/// A rank with a fractional separator is read as a decimal, otherwise as an
/// integer.
#[allow(clippy::cast_precision_loss, reason = "ranks stay far below 2^53")]
fn parse_rank(raw: &str) -> std::result::Result<f64, String> {
    let raw = raw.trim();
    if raw.contains('.') {
        let value = raw
            .parse::<f64>()
            .map_err(|err| format!("invalid rank '{raw}': {err}"))?;
        if !value.is_finite() {
            return Err(format!("invalid rank '{raw}': not finite"));
        }
        return Ok(value);
    }
    let value = raw
        .parse::<i64>()
        .map_err(|err| format!("invalid rank '{raw}': {err}"))?;
    Ok(value as f64)
}

#[must_use]
pub fn render_table(entries: &[Entry]) -> String {
    let mut out = String::with_capacity(entries.len() * 48);
    for entry in entries {
        let _ = writeln!(
            out,
            "{}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{}",
            entry.path(),
            entry.rank(),
            entry.last_access().timestamp()
        );
    }
    out
}

/// Paths that could not survive a write/read cycle through the table.
pub fn validate_record_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ZdirError::InvalidPath("empty path".to_string()));
    }
    if path.contains(FIELD_DELIMITER) || path.contains('\n') || path.contains('\r') {
        return Err(ZdirError::InvalidPath(format!(
            "path contains a reserved character: {path:?}"
        )));
    }
    Ok(())
}
