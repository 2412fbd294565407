//! Shared fixtures for unit tests.

use serde_json::{Value, json};
use uuid::Uuid;

pub const DOC_ID: Uuid = Uuid::from_u128(0xd0c);

/// Deterministic ids so assertions can name blocks.
pub fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn text(s: &str) -> Value {
    json!({"type": "text", "text": s, "styles": {}})
}

pub fn raw_block(id: Uuid, tag: &str, props: Value, content: Vec<Value>) -> Value {
    json!({
        "id": id.to_string(),
        "type": tag,
        "props": props,
        "content": content,
        "children": [],
    })
}

pub fn raw_heading(id: Uuid, level: i64, title: &str) -> Value {
    raw_block(id, "heading", json!({"level": level}), vec![text(title)])
}

pub fn raw_paragraph(id: Uuid, body: &str) -> Value {
    raw_block(id, "paragraph", json!({}), vec![text(body)])
}

pub fn raw_script(id: Uuid, name: &str, code: &str) -> Value {
    raw_block(id, "script", json!({"name": name, "code": code}), vec![])
}

pub fn raw_document(blocks: Vec<Value>) -> Value {
    json!({
        "id": DOC_ID.to_string(),
        "name": "Deploy",
        "version": 1,
        "content": blocks,
    })
}
