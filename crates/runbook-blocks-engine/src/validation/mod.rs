//! Semantic checks over a typed [`Document`].
//!
//! Stops at the first violation. Blocks are visited depth-first in document
//! order and ids are checked against every block seen so far, children
//! included.

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::ValidationError;
use crate::models::{Block, BlockProps, Document, EnumKind, PropValue, enum_kind_for_key, tags};
use crate::parsing::ROOT_PATH;
use crate::parsing::value::{PREVIEW_LEN, preview};

pub const MIN_HEADING_LEVEL: i64 = 1;
pub const MAX_HEADING_LEVEL: i64 = 6;

#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, document: &Document) -> Result<(), ValidationError> {
        if document.id.is_nil() {
            return Err(ValidationError::NilId {
                path: ROOT_PATH.to_string(),
            });
        }
        if document.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if document.version < 1 {
            return Err(ValidationError::InvalidVersion {
                version: document.version,
            });
        }
        self.validate_blocks(&document.content)
    }

    /// Validate a top-level block sequence on its own.
    pub fn validate_blocks(&self, blocks: &[Block]) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for (i, block) in blocks.iter().enumerate() {
            self.validate_block(block, &format!("content[{i}]"), &mut seen)?;
        }
        Ok(())
    }

    fn validate_block(
        &self,
        block: &Block,
        path: &str,
        seen: &mut HashSet<Uuid>,
    ) -> Result<(), ValidationError> {
        if block.id.is_nil() {
            return Err(ValidationError::NilId {
                path: path.to_string(),
            });
        }
        if block.kind().trim().is_empty() {
            return Err(ValidationError::EmptyType {
                path: path.to_string(),
            });
        }
        if !seen.insert(block.id) {
            return Err(ValidationError::DuplicateId {
                path: path.to_string(),
                id: block.id,
            });
        }

        // Typed variants hold enum values by construction.
        if let BlockProps::Unknown { props, .. } = &block.props {
            let props_path = format!("{path}.props");
            for (key, value) in props {
                check_enum_prop(key, value, &props_path)?;
            }
        }

        check_variant(block, path)?;

        for (j, child) in block.children.iter().enumerate() {
            self.validate_block(child, &format!("{path}.children[{j}]"), seen)?;
        }
        Ok(())
    }
}

/// Validate with a default [`Validator`].
pub fn validate(document: &Document) -> Result<(), ValidationError> {
    Validator::new().validate(document)
}

fn check_enum_prop(key: &str, value: &PropValue, path: &str) -> Result<(), ValidationError> {
    let Some(kind) = enum_kind_for_key(key) else {
        return Ok(());
    };
    match (kind, value) {
        (_, v) if v.is_null() => Ok(()),
        (EnumKind::Alignment, PropValue::Alignment(_)) | (EnumKind::Color, PropValue::Color(_)) => {
            Ok(())
        }
        (_, PropValue::Json(raw)) => Err(ValidationError::UncoercedEnum {
            path: path.to_string(),
            key: key.to_string(),
            family: kind.family(),
            found: preview(raw, PREVIEW_LEN),
        }),
        (_, other) => Err(ValidationError::InvalidEnumValue {
            path: path.to_string(),
            key: key.to_string(),
            value: preview(&other.to_json(), PREVIEW_LEN),
            family: kind.family(),
        }),
    }
}

/// Checks keyed on the tag, so open records of known tags are held to the
/// same rules as their typed forms.
fn check_variant(block: &Block, path: &str) -> Result<(), ValidationError> {
    let tag = block.kind();

    if tag == tags::HEADING {
        if let Some(level) = block.prop("level").filter(|v| !v.is_null()) {
            let level = level.to_json();
            match level.as_i64() {
                Some(n) if (MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL).contains(&n) => {}
                _ => {
                    return Err(ValidationError::HeadingLevel {
                        path: path.to_string(),
                        found: preview(&level, PREVIEW_LEN),
                    });
                }
            }
        }
    } else if tags::SCRIPT_LIKE.contains(&tag) {
        for field in ["name", "code"] {
            let present = block
                .prop(field)
                .and_then(|v| v.as_str().map(|s| !s.trim().is_empty()))
                .unwrap_or(false);
            if !present {
                return Err(ValidationError::MissingField {
                    path: path.to_string(),
                    tag: tag.to_string(),
                    field,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeadingProps, PropMap, ScriptProps, TextAlignment};
    use crate::tests::{DOC_ID, id};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn heading(n: u128, level: i64) -> Block {
        Block::new(
            id(n),
            BlockProps::Heading(HeadingProps {
                level,
                ..HeadingProps::default()
            }),
        )
    }

    fn open(n: u128, tag: &str, entries: &[(&str, PropValue)]) -> Block {
        let props: PropMap = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Block::new(id(n), BlockProps::unknown(tag, props))
    }

    fn doc(blocks: Vec<Block>) -> Document {
        Document::new(DOC_ID, "Runbook", 1).with_content(blocks)
    }

    #[test]
    fn test_valid_document() {
        let blocks = vec![
            heading(1, 1),
            Block::new(id(2), BlockProps::Script(ScriptProps::new("build", "make"))),
            open(3, "sqlite", &[("query", json!("select 1").into())]),
        ];
        assert_eq!(validate(&doc(blocks)), Ok(()));
    }

    #[test]
    fn test_header_rules() {
        let mut d = doc(vec![]);
        d.name = "  ".to_string();
        assert_eq!(validate(&d), Err(ValidationError::EmptyName));

        let mut d = doc(vec![]);
        d.version = 0;
        assert_eq!(validate(&d), Err(ValidationError::InvalidVersion { version: 0 }));

        let mut d = doc(vec![]);
        d.id = Uuid::nil();
        assert!(matches!(validate(&d), Err(ValidationError::NilId { .. })));
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(3, true)]
    #[case(6, true)]
    #[case(7, false)]
    fn test_heading_levels(#[case] level: i64, #[case] ok: bool) {
        let typed = validate(&doc(vec![heading(1, level)]));
        let untyped = validate(&doc(vec![open(1, "heading", &[("level", json!(level).into())])]));

        assert_eq!(typed.is_ok(), ok);
        assert_eq!(untyped.is_ok(), ok);
    }

    #[test]
    fn test_non_integer_heading_level() {
        let result = validate(&doc(vec![open(1, "heading", &[("level", json!("two").into())])]));
        assert_eq!(
            result,
            Err(ValidationError::HeadingLevel {
                path: "content[0]".to_string(),
                found: "\"two\"".to_string(),
            })
        );
    }

    #[test]
    fn test_duplicate_ids_anywhere() {
        let first = validate(&doc(vec![heading(1, 1), heading(2, 1), heading(1, 2)]));
        assert_eq!(
            first,
            Err(ValidationError::DuplicateId {
                path: "content[2]".to_string(),
                id: id(1),
            })
        );

        let nested = heading(5, 1).with_children(vec![heading(1, 2)]);
        assert!(matches!(
            validate(&doc(vec![heading(1, 1), nested])),
            Err(ValidationError::DuplicateId { path, .. }) if path == "content[1].children[0]"
        ));
    }

    #[rstest]
    #[case("script", &[("name", json!("x"))], "code")]
    #[case("run", &[("code", json!("ls"))], "name")]
    #[case("editor", &[("name", json!(" ")), ("code", json!("1"))], "name")]
    fn test_script_like_fields(
        #[case] tag: &str,
        #[case] entries: &[(&str, serde_json::Value)],
        #[case] field: &str,
    ) {
        let entries: Vec<(&str, PropValue)> =
            entries.iter().map(|(k, v)| (*k, v.clone().into())).collect();

        match validate(&doc(vec![open(1, tag, &entries)])) {
            Err(ValidationError::MissingField { tag: t, field: f, .. }) => {
                assert_eq!(t, tag);
                assert_eq!(f, field);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_uncoerced_enum_is_internal_error() {
        let block = open(1, "paragraph", &[("textAlignment", json!("center").into())]);
        match validate(&doc(vec![block])) {
            Err(e @ ValidationError::UncoercedEnum { .. }) => {
                assert!(e.to_string().contains("internal error"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let coerced = open(1, "paragraph", &[("textAlignment", TextAlignment::Center.into())]);
        assert_eq!(validate(&doc(vec![coerced])), Ok(()));
    }

    #[test]
    fn test_wrong_enum_family() {
        let block = open(1, "paragraph", &[("textColor", TextAlignment::Left.into())]);
        assert!(matches!(
            validate(&doc(vec![block])),
            Err(ValidationError::InvalidEnumValue { .. })
        ));
    }

    #[test]
    fn test_empty_type_and_nil_block_id() {
        let untagged = open(1, " ", &[]);
        assert!(matches!(
            validate(&doc(vec![untagged])),
            Err(ValidationError::EmptyType { .. })
        ));

        let nil = Block::new(Uuid::nil(), BlockProps::HorizontalRule);
        assert!(matches!(
            validate(&doc(vec![nil])),
            Err(ValidationError::NilId { path }) if path == "content[0]"
        ));
    }
}
