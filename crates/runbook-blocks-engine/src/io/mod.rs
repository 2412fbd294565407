//! Collaborator capabilities: persistence and text rendering.
//!
//! The engine only hands these fully built, validated documents; they
//! report failures through `anyhow`.

use std::collections::BTreeMap;

use runbook_blocks_config::StoreConfig;
use serde_json::Value;
use uuid::Uuid;

use crate::models::Document;

pub trait DocumentStore {
    fn get(&self, id: Uuid) -> anyhow::Result<Option<Document>>;

    /// Insert or overwrite by document id.
    fn save(&mut self, document: Document) -> anyhow::Result<()>;

    /// Documents ordered by id, skipping `offset` and returning at most `limit`.
    fn list(&self, limit: usize, offset: usize) -> anyhow::Result<Vec<Document>>;
}

/// Page `page` (0-based) of `store`, sized by the configured page size.
pub fn list_page<S: DocumentStore + ?Sized>(
    store: &S,
    config: &StoreConfig,
    page: usize,
) -> anyhow::Result<Vec<Document>> {
    let offset = page.saturating_mul(config.page_size);
    store.list(config.page_size, offset)
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    documents: BTreeMap<Uuid, Document>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for InMemoryStore {
    fn get(&self, id: Uuid) -> anyhow::Result<Option<Document>> {
        Ok(self.documents.get(&id).cloned())
    }

    fn save(&mut self, document: Document) -> anyhow::Result<()> {
        log::debug!("storing document {} v{}", document.id, document.version);
        self.documents.insert(document.id, document);
        Ok(())
    }

    fn list(&self, limit: usize, offset: usize) -> anyhow::Result<Vec<Document>> {
        Ok(self
            .documents
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Turns a wire-shaped document value into text.
pub trait Renderer {
    fn render(&self, document: &Value) -> anyhow::Result<String>;
}

#[derive(Debug, Clone, Copy)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, document: &Value) -> anyhow::Result<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };
        Ok(text)
    }
}

/// Strip trailing newlines and add exactly one back.
pub fn ensure_single_trailing_newline(text: &str) -> String {
    let mut out = text.trim_end_matches(['\n', '\r']).to_string();
    out.push('\n');
    out
}
