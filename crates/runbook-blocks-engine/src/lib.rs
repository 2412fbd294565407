//! Typed model, parser, validator, editing container and differ for
//! block-structured runbook documents.
//!
//! ```rust
//! use runbook_blocks_engine::{diff, parse_document};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "id": "6f1c2c6e-6a43-4c7e-9d1b-1f7f9f2b5a10",
//!     "name": "Deploy",
//!     "version": 1,
//!     "content": [{
//!         "id": "0b6e4f3a-2f1d-4e0a-8c57-5b8f3f8f0c11",
//!         "type": "heading",
//!         "props": {"level": 1, "textAlignment": "CENTER"},
//!         "content": [{"type": "text", "text": "Deploy"}],
//!     }],
//! });
//!
//! let doc = parse_document(&raw).unwrap();
//! assert_eq!(doc.content[0].kind(), "heading");
//! assert!(!diff(&doc, &doc).has_changes());
//! ```

pub mod diff;
pub mod editing;
pub mod error;
pub mod io;
pub mod models;
pub mod parsing;
pub mod validation;

#[cfg(test)]
pub mod tests;

pub use diff::{BlockChange, ChangeKind, DocumentDiff, DocumentDiffer, FieldChanges, diff};
pub use editing::{BlockBuilder, BlockContainer, BlockDraft, EditSession, IdGenerator};
pub use error::{ContainerError, DocumentError, RunbookError, SchemaError, ValidationError};
pub use io::{DocumentStore, InMemoryStore, JsonRenderer, Renderer};
pub use models::{Block, BlockProps, Document};
pub use parsing::{ParseMode, ParseOptions, Parser, parse_document};
pub use validation::{Validator, validate};
