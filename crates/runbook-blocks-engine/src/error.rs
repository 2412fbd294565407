//! Error taxonomy for parsing, validation and editing.
//!
//! Every variant carries the location (`path`) of the offending value in the
//! document tree, e.g. `content[2].children[0].props`, plus whatever key,
//! value and expected shape apply.

use thiserror::Error;
use uuid::Uuid;

/// The input does not have the required shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("{path}: expected a mapping, found {found}")]
    NotAMapping { path: String, found: &'static str },

    #[error("{path}: expected a sequence, found {found}")]
    NotASequence { path: String, found: &'static str },

    #[error("{path}: expected a string, found {found}")]
    NotAString { path: String, found: &'static str },

    #[error("{path}: missing required key '{key}'")]
    MissingKey { path: String, key: &'static str },
}

impl SchemaError {
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            SchemaError::NotAMapping { .. } => {
                Some("Documents, blocks and their props are key/value mappings")
            }
            SchemaError::NotASequence { .. } => Some("Use a list for 'content' and 'children'"),
            SchemaError::NotAString { .. } => Some("Block 'type' tags are strings"),
            SchemaError::MissingKey { key, .. } => match *key {
                "id" => Some("Every document and block needs a UUID 'id'"),
                "type" => Some("Add a 'type' tag such as 'paragraph' or 'heading'"),
                _ => Some("Documents need 'id', 'name' and 'version'"),
            },
        }
    }
}

/// The input has the right shape but breaks a semantic rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{path}: '{key}' has value {value}, expected {expected}")]
    InvalidValue {
        path: String,
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("{path}: invalid {family} value {value} for '{key}'")]
    InvalidEnumValue {
        path: String,
        key: String,
        value: String,
        family: &'static str,
    },

    #[error("{path}: unexpected key '{key}'")]
    UnexpectedKey { path: String, key: String },

    /// A raw value reached validation under an enum-keyed property. Parsing
    /// always coerces these, so this signals a bug in the caller, not bad input.
    #[error("{path}: '{key}' must hold a coerced {family} value, found {found} (internal error)")]
    UncoercedEnum {
        path: String,
        key: String,
        family: &'static str,
        found: String,
    },

    #[error("{path}: identifier must not be the nil UUID")]
    NilId { path: String },

    #[error("document 'name' must be a non-empty string")]
    EmptyName,

    #[error("document 'version' must be >= 1, found {version}")]
    InvalidVersion { version: i64 },

    #[error("{path}: block 'type' must be a non-empty string")]
    EmptyType { path: String },

    #[error("{path}: duplicate block id {id}")]
    DuplicateId { path: String, id: Uuid },

    #[error("{path}: heading 'level' must be an integer between 1 and 6, found {found}")]
    HeadingLevel { path: String, found: String },

    #[error("{path}: {tag} block requires a non-empty '{field}'")]
    MissingField {
        path: String,
        tag: String,
        field: &'static str,
    },
}

impl ValidationError {
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ValidationError::InvalidValue { .. } => None,
            ValidationError::InvalidEnumValue { family, .. } => match *family {
                "TextAlignment" => Some("Use one of: left, center, right, justify"),
                _ => Some(
                    "Use one of: default, muted, accent, primary, secondary, success, warning, danger, info",
                ),
            },
            ValidationError::UnexpectedKey { .. } => {
                Some("Blocks may only contain id, type, props, content and children")
            }
            ValidationError::UncoercedEnum { .. } => {
                Some("Build blocks through the parser or coerce props before validating")
            }
            ValidationError::NilId { .. } => Some("Generate a fresh identifier"),
            ValidationError::EmptyName => Some("Give the document a name"),
            ValidationError::InvalidVersion { .. } => Some("Versions start at 1"),
            ValidationError::EmptyType { .. } => None,
            ValidationError::DuplicateId { .. } => {
                Some("Block ids must be unique; generate a new id for copied blocks")
            }
            ValidationError::HeadingLevel { .. } => Some("Use a heading level from 1 to 6"),
            ValidationError::MissingField { .. } => None,
        }
    }
}

/// Returned by the parser: either the shape or a rule was wrong.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocumentError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl DocumentError {
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            DocumentError::Schema(e) => e.suggestion(),
            DocumentError::Validation(e) => e.suggestion(),
        }
    }
}

/// Block container failures. The container is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("index {index} out of bounds for container of length {len}")]
    Index { index: usize, len: usize },

    #[error("cannot move from {from} to {to}: indices straddle the existing/new boundary at {boundary}")]
    CrossRegion {
        from: usize,
        to: usize,
        boundary: usize,
    },
}

impl ContainerError {
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ContainerError::Index { .. } => None,
            ContainerError::CrossRegion { .. } => {
                Some("Replace the loaded block with a new draft instead of moving it")
            }
        }
    }
}

/// Crate-level error for editing sessions and collaborator calls.
#[derive(Debug, Error)]
pub enum RunbookError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error("store error: {0}")]
    Store(#[source] anyhow::Error),

    #[error("render error: {0}")]
    Render(#[source] anyhow::Error),
}

impl From<SchemaError> for RunbookError {
    fn from(e: SchemaError) -> Self {
        RunbookError::Document(e.into())
    }
}

impl From<ValidationError> for RunbookError {
    fn from(e: ValidationError) -> Self {
        RunbookError::Document(e.into())
    }
}
