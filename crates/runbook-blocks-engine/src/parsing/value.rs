use serde_json::Value;

/// Human-readable shape name used in schema errors.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// Renders a value for an error message, truncating to `max` bytes with "..." suffix if needed.
pub fn preview(value: &Value, max: usize) -> String {
    let mut s = value.to_string();
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}

/// Preview length used in error messages.
pub const PREVIEW_LEN: usize = 60;
