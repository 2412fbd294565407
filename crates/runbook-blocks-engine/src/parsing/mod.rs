//! Untyped tree to typed [`Document`].
//!
//! Input is a `serde_json::Value` in wire shape. Whatever textual format the
//! caller reads (JSON, YAML) is decoded into that value first.

pub mod coerce;
pub mod content;
pub mod value;

#[cfg(test)]
mod tests;

use runbook_blocks_config::{Config, ParseModeSetting, ParserConfig};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{DocumentError, SchemaError, ValidationError};
use crate::models::{Block, BlockProps, Document, PropMap};
use crate::validation::Validator;

use coerce::coerce_props;
use content::parse_content;
use value::{PREVIEW_LEN, kind_of, preview};

/// Path of the document root in error messages.
pub const ROOT_PATH: &str = "document";

/// The only keys a block mapping may carry.
pub const BLOCK_KEYS: &[&str] = &["id", "type", "props", "content", "children"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Materialize the typed variant for each known tag, falling back to the
    /// open record per block when its props do not fit.
    #[default]
    Discriminated,
    /// Keep every block as an open record.
    ShapePreserving,
}

impl From<ParseModeSetting> for ParseMode {
    fn from(setting: ParseModeSetting) -> Self {
        match setting {
            ParseModeSetting::Discriminated => ParseMode::Discriminated,
            ParseModeSetting::ShapePreserving => ParseMode::ShapePreserving,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub mode: ParseMode,
    /// Run the validator on the parsed document.
    pub validate: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::Discriminated,
            validate: true,
        }
    }
}

impl ParseOptions {
    pub fn shape_preserving() -> Self {
        Self {
            mode: ParseMode::ShapePreserving,
            ..Self::default()
        }
    }

    pub fn without_validation(self) -> Self {
        Self {
            validate: false,
            ..self
        }
    }
}

impl From<&ParserConfig> for ParseOptions {
    fn from(config: &ParserConfig) -> Self {
        Self {
            mode: config.mode.into(),
            validate: config.validate,
        }
    }
}

impl From<&Config> for ParseOptions {
    fn from(config: &Config) -> Self {
        (&config.parser).into()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse a whole document, validating it if enabled.
    pub fn parse(&self, raw: &Value) -> Result<Document, DocumentError> {
        let Value::Object(map) = raw else {
            return Err(SchemaError::NotAMapping {
                path: ROOT_PATH.to_string(),
                found: kind_of(raw),
            }
            .into());
        };

        let id = parse_id(required(map, "id", ROOT_PATH)?, ROOT_PATH)?;
        let name = coerce_string(required(map, "name", ROOT_PATH)?, ROOT_PATH, "name")?;
        let version = coerce_int(required(map, "version", ROOT_PATH)?, ROOT_PATH, "version")?;

        let content = match map.get("content") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.parse_block(item, &format!("content[{i}]")))
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(SchemaError::NotASequence {
                    path: "content".to_string(),
                    found: kind_of(other),
                }
                .into());
            }
        };

        let document = Document {
            id,
            name,
            version,
            content,
        };

        if self.options.validate {
            Validator::new().validate(&document)?;
        }

        log::debug!(
            "parsed document {} ({} top-level blocks, mode {:?})",
            document.id,
            document.content.len(),
            self.options.mode
        );
        Ok(document)
    }

    /// Parse one block (and its children) found at `path`.
    ///
    /// Never validates; id uniqueness is a document-level rule.
    pub fn parse_block(&self, raw: &Value, path: &str) -> Result<Block, DocumentError> {
        let Value::Object(map) = raw else {
            return Err(SchemaError::NotAMapping {
                path: path.to_string(),
                found: kind_of(raw),
            }
            .into());
        };

        if let Some(key) = map.keys().find(|k| !BLOCK_KEYS.contains(&k.as_str())) {
            return Err(ValidationError::UnexpectedKey {
                path: path.to_string(),
                key: key.clone(),
            }
            .into());
        }

        let id = parse_id(required(map, "id", path)?, path)?;
        let tag = match required(map, "type", path)? {
            Value::String(s) => s.clone(),
            other => {
                return Err(SchemaError::NotAString {
                    path: format!("{path}.type"),
                    found: kind_of(other),
                }
                .into());
            }
        };

        let props_path = format!("{path}.props");
        let props = match map.get("props") {
            None | Some(Value::Null) => PropMap::new(),
            Some(Value::Object(raw_props)) => coerce_props(raw_props, &props_path)?,
            Some(other) => {
                return Err(SchemaError::NotAMapping {
                    path: props_path,
                    found: kind_of(other),
                }
                .into());
            }
        };

        let content = match map.get("content") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => parse_content(items, path)?,
            Some(other) => {
                return Err(SchemaError::NotASequence {
                    path: format!("{path}.content"),
                    found: kind_of(other),
                }
                .into());
            }
        };

        let children = match map.get("children") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(j, child)| self.parse_block(child, &format!("{path}.children[{j}]")))
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(SchemaError::NotASequence {
                    path: format!("{path}.children"),
                    found: kind_of(other),
                }
                .into());
            }
        };

        let props = match self.options.mode {
            ParseMode::ShapePreserving => BlockProps::unknown(tag, props),
            ParseMode::Discriminated => match BlockProps::materialize(&tag, &props) {
                Some(typed) => typed,
                None => {
                    log::debug!("{path}: keeping open record for '{tag}' block");
                    BlockProps::unknown(tag, props)
                }
            },
        };

        Ok(Block {
            id,
            props,
            content,
            children,
        })
    }
}

/// Parse and validate with default options.
pub fn parse_document(raw: &Value) -> Result<Document, DocumentError> {
    Parser::default().parse(raw)
}

fn required<'a>(
    map: &'a Map<String, Value>,
    key: &'static str,
    path: &str,
) -> Result<&'a Value, SchemaError> {
    match map.get(key) {
        None | Some(Value::Null) => Err(SchemaError::MissingKey {
            path: path.to_string(),
            key,
        }),
        Some(value) => Ok(value),
    }
}

fn invalid(path: &str, key: &str, value: &Value, expected: &'static str) -> ValidationError {
    ValidationError::InvalidValue {
        path: path.to_string(),
        key: key.to_string(),
        value: preview(value, PREVIEW_LEN),
        expected,
    }
}

fn parse_id(value: &Value, path: &str) -> Result<Uuid, ValidationError> {
    value
        .as_str()
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
        .ok_or_else(|| invalid(path, "id", value, "a UUID string"))
}

/// Scalars are accepted as strings; containers are not.
pub fn coerce_string(value: &Value, path: &str, key: &str) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(invalid(path, key, other, "a string")),
    }
}

/// Integers, whole floats and numeric strings are accepted.
pub fn coerce_int(value: &Value, path: &str, key: &str) -> Result<i64, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(path, key, value, "an integer"))
}
