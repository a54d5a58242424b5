use serde_json::Value;

/// Body fields that may carry the source text, highest priority first.
pub const TEXT_FIELDS: [&str; 5] = ["text", "selectedText", "selection", "fragment", "content"];

/// Parses a raw request body. Anything that is not a JSON object is treated
/// as an empty mapping.
pub fn parse_body(raw: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(raw) {
        Ok(value @ Value::Object(_)) => value,
        _ => Value::Object(Default::default()),
    }
}

/// Returns the first recognized field whose coerced, trimmed value is
/// non-empty.
pub fn extract_text(body: &Value) -> Option<String> {
    TEXT_FIELDS
        .iter()
        .filter_map(|field| body.get(*field))
        .filter_map(coerce_to_string)
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty())
}

/// Keys present on the inbound body, in the order they were received.
pub fn received_keys(body: &Value) -> Vec<String> {
    body.as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}

/// Cuts `text` down to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn coerce_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
