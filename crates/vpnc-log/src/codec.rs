//! JSON codec for the persisted event array.
//!
//! The log file is one JSON array of `{"status", "timestamp"}` objects in
//! append order. It is pretty-printed so it stays readable by hand.

use crate::event::Event;
use crate::store::StorageError;

/// Decode a persisted log document.
///
/// A blank document is an empty log, so a file truncated to zero bytes by an
/// external tool loads cleanly instead of failing.
pub fn decode_events(text: &str) -> Result<Vec<Event>, StorageError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Vec<Event>>(text).map_err(|e| {
        StorageError::Parse(format!(
            "line {} column {}: {e}",
            e.line(),
            e.column()
        ))
    })
}

/// Encode events as the persisted document, with a trailing newline.
pub fn encode_events(events: &[Event]) -> Result<String, StorageError> {
    let mut rendered =
        serde_json::to_string_pretty(events).map_err(|e| StorageError::Serialize(e.to_string()))?;
    rendered.push('\n');
    Ok(rendered)
}

/// Reject byte payloads that cannot be a JSON document we wrote.
pub(crate) fn validate_bytes(bytes: &[u8]) -> Result<&str, String> {
    if bytes.contains(&0) {
        return Err("contains NUL byte(s)".to_string());
    }
    std::str::from_utf8(bytes).map_err(|_| "contains non-UTF-8 byte sequence(s)".to_string())
}
