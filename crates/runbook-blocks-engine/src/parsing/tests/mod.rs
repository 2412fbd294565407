//! Parser behaviour over whole documents.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::error::{DocumentError, SchemaError, ValidationError};
use crate::models::{BlockProps, ColorToken, InlineContent, PropValue, TextAlignment};
use crate::parsing::{ParseMode, ParseOptions, Parser, parse_document};
use crate::tests::{
    DOC_ID, id, raw_block, raw_document, raw_heading, raw_paragraph, raw_script, text,
};

fn schema_err(raw: &Value) -> SchemaError {
    match parse_document(raw) {
        Err(DocumentError::Schema(e)) => e,
        other => panic!("expected schema error, got {other:?}"),
    }
}

fn validation_err(raw: &Value) -> ValidationError {
    match parse_document(raw) {
        Err(DocumentError::Validation(e)) => e,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn parses_header_and_blocks_in_order() {
    let raw = raw_document(vec![
        raw_heading(id(1), 1, "Title"),
        raw_paragraph(id(2), "body"),
        raw_script(id(3), "build", "make"),
    ]);

    let doc = parse_document(&raw).unwrap();

    assert_eq!(doc.id, DOC_ID);
    assert_eq!(doc.name, "Deploy");
    assert_eq!(doc.version, 1);
    assert_eq!(doc.block_ids(), vec![id(1), id(2), id(3)]);
    assert!(matches!(doc.content[0].props, BlockProps::Heading(ref h) if h.level == 1));
    assert!(matches!(doc.content[1].props, BlockProps::Paragraph(_)));
    assert!(matches!(doc.content[2].props, BlockProps::Script(_)));
    assert_eq!(doc.content[1].content, vec![InlineContent::text("body")]);
}

#[test]
fn coerces_enum_tokens_before_materializing() {
    let raw = raw_document(vec![raw_block(
        id(1),
        "paragraph",
        json!({"textAlignment": "CENTER", "textColor": "Accent"}),
        vec![],
    )]);

    let doc = parse_document(&raw).unwrap();

    match &doc.content[0].props {
        BlockProps::Paragraph(p) => {
            assert_eq!(p.text_alignment, TextAlignment::Center);
            assert_eq!(p.text_color, ColorToken::Accent);
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn shape_preserving_keeps_open_records() {
    let raw = raw_document(vec![
        raw_heading(id(1), 2, "Title"),
        raw_block(id(2), "paragraph", json!({"textAlign": "RIGHT"}), vec![]),
    ]);

    let doc = Parser::new(ParseOptions::shape_preserving()).parse(&raw).unwrap();

    assert!(doc.content.iter().all(|b| b.props.is_unknown()));
    assert_eq!(doc.content[0].kind(), "heading");
    assert_eq!(
        doc.content[1].prop("textAlign"),
        Some(PropValue::Alignment(TextAlignment::Right))
    );
}

#[test]
fn mismatched_block_degrades_without_aborting() {
    let raw = raw_document(vec![
        raw_block(id(1), "paragraph", json!({"custom": 1}), vec![]),
        raw_paragraph(id(2), "fine"),
        raw_block(id(3), "sqlite", json!({"query": "select 1"}), vec![]),
    ]);

    let doc = parse_document(&raw).unwrap();

    assert!(doc.content[0].props.is_unknown());
    assert_eq!(doc.content[0].kind(), "paragraph");
    assert!(matches!(doc.content[1].props, BlockProps::Paragraph(_)));
    assert!(doc.content[2].props.is_unknown());
    assert_eq!(doc.content[2].kind(), "sqlite");
}

#[test]
fn children_are_parsed_recursively() {
    let mut toggle = raw_block(id(1), "toggleListItem", json!({}), vec![text("More")]);
    toggle["children"] = json!([raw_paragraph(id(2), "hidden"), raw_script(id(3), "a", "b")]);

    let doc = parse_document(&raw_document(vec![toggle])).unwrap();

    let children = &doc.content[0].children;
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].id, id(3));
    assert!(matches!(children[1].props, BlockProps::Script(_)));
}

#[test]
fn missing_optional_fields_default_to_empty() {
    let raw = raw_document(vec![json!({"id": id(1).to_string(), "type": "horizontal_rule"})]);

    let doc = parse_document(&raw).unwrap();

    assert_eq!(doc.content[0].props, BlockProps::HorizontalRule);
    assert!(doc.content[0].content.is_empty());
    assert!(doc.content[0].children.is_empty());

    let empty = json!({"id": DOC_ID.to_string(), "name": "Empty", "version": 1});
    assert!(parse_document(&empty).unwrap().content.is_empty());
}

#[rstest]
#[case(json!(2), 2)]
#[case(json!(3.0), 3)]
#[case(json!(" 4 "), 4)]
fn version_coercion(#[case] version: Value, #[case] expected: i64) {
    let mut raw = raw_document(vec![]);
    raw["version"] = version;
    assert_eq!(parse_document(&raw).unwrap().version, expected);
}

#[test]
fn numeric_name_is_stringified() {
    let mut raw = raw_document(vec![]);
    raw["name"] = json!(2024);
    assert_eq!(parse_document(&raw).unwrap().name, "2024");
}

#[test]
fn top_level_must_be_a_mapping() {
    assert_eq!(
        schema_err(&json!([1, 2])),
        SchemaError::NotAMapping {
            path: "document".to_string(),
            found: "a sequence",
        }
    );
}

#[rstest]
#[case("id")]
#[case("name")]
#[case("version")]
fn document_keys_are_required(#[case] key: &str) {
    let mut raw = raw_document(vec![]);
    raw.as_object_mut().unwrap().remove(key);

    match schema_err(&raw) {
        SchemaError::MissingKey { path, key: missing } => {
            assert_eq!(path, "document");
            assert_eq!(missing, key);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn content_must_be_a_sequence() {
    let mut raw = raw_document(vec![]);
    raw["content"] = json!({"a": 1});
    assert!(matches!(
        schema_err(&raw),
        SchemaError::NotASequence { found: "a mapping", .. }
    ));
}

#[test]
fn block_entries_must_be_mappings() {
    let raw = raw_document(vec![raw_paragraph(id(1), "ok"), json!("oops")]);
    assert_eq!(
        schema_err(&raw),
        SchemaError::NotAMapping {
            path: "content[1]".to_string(),
            found: "a string",
        }
    );

    let mut parent = raw_paragraph(id(1), "ok");
    parent["children"] = json!([7]);
    assert_eq!(
        schema_err(&raw_document(vec![parent])),
        SchemaError::NotAMapping {
            path: "content[0].children[0]".to_string(),
            found: "a number",
        }
    );
}

#[rstest]
#[case("id")]
#[case("type")]
fn block_keys_are_required(#[case] key: &str) {
    let mut block = raw_paragraph(id(1), "x");
    block.as_object_mut().unwrap().remove(key);

    match schema_err(&raw_document(vec![block])) {
        SchemaError::MissingKey { path, key: missing } => {
            assert_eq!(path, "content[0]");
            assert_eq!(missing, key);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unexpected_block_key_is_rejected() {
    let mut block = raw_paragraph(id(1), "x");
    block["colour"] = json!("red");

    assert_eq!(
        validation_err(&raw_document(vec![block])),
        ValidationError::UnexpectedKey {
            path: "content[0]".to_string(),
            key: "colour".to_string(),
        }
    );
}

#[test]
fn bad_enum_token_names_the_key() {
    let raw = raw_document(vec![
        raw_paragraph(id(1), "x"),
        raw_block(id(2), "heading", json!({"level": 1, "textColor": "nope"}), vec![]),
    ]);

    match validation_err(&raw) {
        ValidationError::InvalidEnumValue {
            path, key, family, ..
        } => {
            assert_eq!(path, "content[1].props");
            assert_eq!(key, "textColor");
            assert_eq!(family, "ColorToken");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[rstest]
#[case(json!("not-a-uuid"))]
#[case(json!(42))]
fn ids_must_be_uuids(#[case] bad: Value) {
    let mut block = raw_paragraph(id(1), "x");
    block["id"] = bad;

    assert!(matches!(
        validation_err(&raw_document(vec![block])),
        ValidationError::InvalidValue { key, expected: "a UUID string", .. } if key == "id"
    ));
}

#[rstest]
#[case("props", json!([1]))]
#[case("content", json!("text"))]
#[case("children", json!({}))]
#[case("type", json!(7))]
fn block_fields_need_container_shapes(#[case] key: &str, #[case] bad: Value) {
    let mut block = raw_paragraph(id(1), "x");
    block[key] = bad;

    let err = schema_err(&raw_document(vec![block]));
    let path = match &err {
        SchemaError::NotAMapping { path, .. }
        | SchemaError::NotASequence { path, .. }
        | SchemaError::NotAString { path, .. } => path.clone(),
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(path, format!("content[0].{key}"));
    assert!(err.suggestion().is_some());
}

#[test]
fn nested_child_shape_errors_carry_full_path() {
    let mut child = raw_paragraph(id(2), "inner");
    child["props"] = json!("bold");
    let mut parent = raw_paragraph(id(1), "outer");
    parent["children"] = json!([child]);

    assert_eq!(
        schema_err(&raw_document(vec![parent])),
        SchemaError::NotAMapping {
            path: "content[0].children[0].props".to_string(),
            found: "a string",
        }
    );
}

#[test]
fn validation_is_optional() {
    let raw = raw_document(vec![raw_paragraph(id(1), "a"), raw_paragraph(id(1), "b")]);

    assert!(matches!(
        validation_err(&raw),
        ValidationError::DuplicateId { .. }
    ));

    let lenient = Parser::new(ParseOptions::default().without_validation());
    assert_eq!(lenient.parse(&raw).unwrap().content.len(), 2);
}

#[test]
fn options_follow_config() {
    let mut config = runbook_blocks_config::Config::default();
    config.parser.mode = runbook_blocks_config::ParseModeSetting::ShapePreserving;
    config.parser.validate = false;

    let options = ParseOptions::from(&config);

    assert_eq!(options.mode, ParseMode::ShapePreserving);
    assert!(!options.validate);
    assert_eq!(Parser::default().options(), ParseOptions::default());
}
