// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use serde_json::{Value, json};
use uuid::Uuid;

fn block_id(n: usize) -> String {
    Uuid::from_u128(n as u128 + 1).to_string()
}

#[allow(dead_code)]
pub fn generate_runbook(sections: usize) -> Value {
    let mut blocks = Vec::new();
    for section in 0..sections {
        let base = section * 4;
        blocks.push(json!({
            "id": block_id(base),
            "type": "heading",
            "props": {"level": 2, "textAlignment": "Left"},
            "content": [{"type": "text", "text": format!("Section {section}")}],
        }));
        blocks.push(json!({
            "id": block_id(base + 1),
            "type": "paragraph",
            "props": {"textColor": "MUTED"},
            "content": [{"type": "text", "text": "Run the following", "styles": {"bold": true}}],
        }));
        blocks.push(json!({
            "id": block_id(base + 2),
            "type": "script",
            "props": {"name": format!("step-{section}"), "code": "make deploy", "interpreter": "bash"},
        }));
        blocks.push(json!({
            "id": block_id(base + 3),
            "type": "toggleListItem",
            "content": [{"type": "text", "text": "Details"}],
            "children": [{
                "id": Uuid::from_u128(1_000_000 + section as u128).to_string(),
                "type": "env",
                "props": {"name": "STAGE", "value": "prod"},
            }],
        }));
    }

    json!({
        "id": Uuid::from_u128(u128::MAX).to_string(),
        "name": "Benchmark runbook",
        "version": 1,
        "content": blocks,
    })
}

/// Reverse the top-level blocks, so every block moves.
#[allow(dead_code)]
pub fn reversed(mut doc: Value) -> Value {
    if let Some(blocks) = doc["content"].as_array_mut() {
        blocks.reverse();
    }
    doc
}
