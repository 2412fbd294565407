use serde_json::{Value, json};
use uuid::Uuid;

use super::block::Block;

/// A runbook: header metadata plus an ordered sequence of top-level blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    /// Must be >= 1 once validated.
    pub version: i64,
    pub content: Vec<Block>,
}

impl Document {
    pub fn new(id: Uuid, name: impl Into<String>, version: i64) -> Self {
        Self {
            id,
            name: name.into(),
            version,
            content: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: Vec<Block>) -> Self {
        self.content = content;
        self
    }

    /// Position and block for a top-level id.
    pub fn find(&self, id: Uuid) -> Option<(usize, &Block)> {
        self.content.iter().enumerate().find(|(_, b)| b.id == id)
    }

    pub fn block_ids(&self) -> Vec<Uuid> {
        self.content.iter().map(|b| b.id).collect()
    }

    /// Wire mapping `{id, name, version, content}`.
    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id.to_string(),
            "name": self.name,
            "version": self.version,
            "content": self.content.iter().map(Block::to_value).collect::<Vec<_>>(),
        })
    }
}
