//! Inline content parsing.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::models::{InlineContent, TextStyles};

use super::value::{PREVIEW_LEN, preview};

const TEXT: &str = "text";
const RUNBOOK_LINK: &str = "runbook-link";

/// Parse one inline element found at `path`.
///
/// Elements of unrecognized type, or with non-mapping shape, are kept
/// verbatim as [`InlineContent::Other`].
pub fn parse_inline(raw: &Value, path: &str) -> Result<InlineContent, ValidationError> {
    let Value::Object(map) = raw else {
        return Ok(InlineContent::Other(raw.clone()));
    };

    match map.get("type").and_then(Value::as_str) {
        Some(TEXT) => parse_text(map, path),
        Some(RUNBOOK_LINK) => match map.get("props") {
            None | Some(Value::Null) => Ok(InlineContent::RunbookLink { props: Map::new() }),
            Some(Value::Object(props)) => Ok(InlineContent::RunbookLink {
                props: props.clone(),
            }),
            Some(other) => Err(ValidationError::InvalidValue {
                path: path.to_string(),
                key: "props".to_string(),
                value: preview(other, PREVIEW_LEN),
                expected: "a mapping",
            }),
        },
        _ => Ok(InlineContent::Other(raw.clone())),
    }
}

fn parse_text(map: &Map<String, Value>, path: &str) -> Result<InlineContent, ValidationError> {
    let text = match map.get("text") {
        Some(Value::String(s)) => s.clone(),
        other => {
            return Err(ValidationError::InvalidValue {
                path: path.to_string(),
                key: "text".to_string(),
                value: other.map_or_else(|| "nothing".to_string(), |v| preview(v, PREVIEW_LEN)),
                expected: "a string",
            });
        }
    };

    // Styles outside the known flags, or extra keys, would be lost by the
    // typed form.
    let styles = match map.get("styles") {
        None | Some(Value::Null) => Some(TextStyles::default()),
        Some(raw) => serde_json::from_value::<TextStyles>(raw.clone()).ok(),
    };
    let extra_keys = map
        .keys()
        .any(|k| !matches!(k.as_str(), "type" | "text" | "styles"));

    let Some(styles) = styles.filter(|_| !extra_keys) else {
        return Ok(InlineContent::Other(Value::Object(map.clone())));
    };

    Ok(InlineContent::Text { text, styles })
}

/// Parse a block's `content` sequence.
pub fn parse_content(items: &[Value], path: &str) -> Result<Vec<InlineContent>, ValidationError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_inline(item, &format!("{path}.content[{i}]")))
        .collect()
}
