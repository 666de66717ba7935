use serde_json::Value;
use std::io::{self, Read};

/// Read a JSON document from stdin when data is being piped.
/// Returns None for an interactive terminal or an empty pipe.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    tracing::debug!(bytes = trimmed.len(), "read input document from stdin");

    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse stdin as JSON: {}", e))?;
    Ok(Some(value))
}
