use serde_json::Value;

/// Normalizes a flag that may have crossed a stringifying boundary.
///
/// Accepts JSON booleans and the exact strings `"true"` / `"false"`. Anything
/// else is `None`, which callers must treat as invalid rather than `false`.
#[must_use]
pub fn coerce_boolean(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) if text == "true" => Some(true),
        Value::String(text) if text == "false" => Some(false),
        _ => None,
    }
}
