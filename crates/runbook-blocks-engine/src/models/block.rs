use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use super::props::{
    CheckListProps, CodeBlockProps, DirectoryProps, EditorProps, EnvProps, HeadingProps,
    HorizontalRuleProps, LocalVarProps, PropMap, PropValue, RunProps, ScriptProps, TextProps,
    VarDisplayProps, VarProps, prop_map_to_json,
};

/// Wire tags of the block variants that have a typed representation.
pub mod tags {
    pub const HEADING: &str = "heading";
    pub const PARAGRAPH: &str = "paragraph";
    pub const QUOTE: &str = "quote";
    pub const BULLET_LIST_ITEM: &str = "bulletListItem";
    pub const NUMBERED_LIST_ITEM: &str = "numberedListItem";
    pub const TOGGLE_LIST_ITEM: &str = "toggleListItem";
    pub const CHECK_LIST_ITEM: &str = "checkListItem";
    pub const CODE_BLOCK: &str = "codeBlock";
    pub const HORIZONTAL_RULE: &str = "horizontal_rule";
    pub const EDITOR: &str = "editor";
    pub const SCRIPT: &str = "script";
    pub const RUN: &str = "run";
    pub const ENV: &str = "env";
    pub const VAR: &str = "var";
    pub const LOCAL_VAR: &str = "local-var";
    pub const VAR_DISPLAY: &str = "var_display";
    pub const DIRECTORY: &str = "directory";
    pub const LOCAL_DIRECTORY: &str = "local-directory";

    /// Blocks that execute code and therefore need a name and a body.
    pub const SCRIPT_LIKE: &[&str] = &[SCRIPT, RUN, EDITOR];
}

/// The discriminated part of a block: its tag plus the matching props.
///
/// `Unknown` is the open record. It holds tags this crate does not model,
/// every block of a shape-preserving parse, and any block whose props did
/// not fit its variant.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockProps {
    Heading(HeadingProps),
    Paragraph(TextProps),
    Quote(TextProps),
    BulletListItem(TextProps),
    NumberedListItem(TextProps),
    ToggleListItem(TextProps),
    CheckListItem(CheckListProps),
    CodeBlock(CodeBlockProps),
    HorizontalRule,
    Editor(EditorProps),
    Script(ScriptProps),
    Run(RunProps),
    Env(EnvProps),
    Var(VarProps),
    LocalVar(LocalVarProps),
    VarDisplay(VarDisplayProps),
    Directory(DirectoryProps),
    LocalDirectory(DirectoryProps),
    Unknown { tag: String, props: PropMap },
}

impl BlockProps {
    pub fn unknown(tag: impl Into<String>, props: PropMap) -> Self {
        BlockProps::Unknown {
            tag: tag.into(),
            props,
        }
    }

    /// The wire discriminant.
    pub fn tag(&self) -> &str {
        match self {
            BlockProps::Heading(_) => tags::HEADING,
            BlockProps::Paragraph(_) => tags::PARAGRAPH,
            BlockProps::Quote(_) => tags::QUOTE,
            BlockProps::BulletListItem(_) => tags::BULLET_LIST_ITEM,
            BlockProps::NumberedListItem(_) => tags::NUMBERED_LIST_ITEM,
            BlockProps::ToggleListItem(_) => tags::TOGGLE_LIST_ITEM,
            BlockProps::CheckListItem(_) => tags::CHECK_LIST_ITEM,
            BlockProps::CodeBlock(_) => tags::CODE_BLOCK,
            BlockProps::HorizontalRule => tags::HORIZONTAL_RULE,
            BlockProps::Editor(_) => tags::EDITOR,
            BlockProps::Script(_) => tags::SCRIPT,
            BlockProps::Run(_) => tags::RUN,
            BlockProps::Env(_) => tags::ENV,
            BlockProps::Var(_) => tags::VAR,
            BlockProps::LocalVar(_) => tags::LOCAL_VAR,
            BlockProps::VarDisplay(_) => tags::VAR_DISPLAY,
            BlockProps::Directory(_) => tags::DIRECTORY,
            BlockProps::LocalDirectory(_) => tags::LOCAL_DIRECTORY,
            BlockProps::Unknown { tag, .. } => tag,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, BlockProps::Unknown { .. })
    }

    /// Materialize the most specific variant for `tag`.
    ///
    /// Returns `None` when the tag has no typed variant or the props do not
    /// fit it; callers keep the open record in that case.
    pub fn materialize(tag: &str, props: &PropMap) -> Option<BlockProps> {
        let variant = match tag {
            tags::HEADING => BlockProps::Heading(typed(props)?),
            tags::PARAGRAPH => BlockProps::Paragraph(typed(props)?),
            tags::QUOTE => BlockProps::Quote(typed(props)?),
            tags::BULLET_LIST_ITEM => BlockProps::BulletListItem(typed(props)?),
            tags::NUMBERED_LIST_ITEM => BlockProps::NumberedListItem(typed(props)?),
            tags::TOGGLE_LIST_ITEM => BlockProps::ToggleListItem(typed(props)?),
            tags::CHECK_LIST_ITEM => BlockProps::CheckListItem(typed(props)?),
            tags::CODE_BLOCK => BlockProps::CodeBlock(typed(props)?),
            tags::HORIZONTAL_RULE => {
                let _: HorizontalRuleProps = typed(props)?;
                BlockProps::HorizontalRule
            }
            tags::EDITOR => BlockProps::Editor(typed(props)?),
            tags::SCRIPT => BlockProps::Script(typed(props)?),
            tags::RUN => BlockProps::Run(typed(props)?),
            tags::ENV => BlockProps::Env(typed(props)?),
            tags::VAR => BlockProps::Var(typed(props)?),
            tags::LOCAL_VAR => BlockProps::LocalVar(typed(props)?),
            tags::VAR_DISPLAY => BlockProps::VarDisplay(typed(props)?),
            tags::DIRECTORY => BlockProps::Directory(typed(props)?),
            tags::LOCAL_DIRECTORY => BlockProps::LocalDirectory(typed(props)?),
            _ => return None,
        };
        Some(variant)
    }

    /// Props as a wire mapping, enum values written as their tokens.
    pub fn to_json_map(&self) -> Map<String, Value> {
        match self {
            BlockProps::Heading(p) => typed_to_map(p),
            BlockProps::Paragraph(p)
            | BlockProps::Quote(p)
            | BlockProps::BulletListItem(p)
            | BlockProps::NumberedListItem(p)
            | BlockProps::ToggleListItem(p) => typed_to_map(p),
            BlockProps::CheckListItem(p) => typed_to_map(p),
            BlockProps::CodeBlock(p) => typed_to_map(p),
            BlockProps::HorizontalRule => Map::new(),
            BlockProps::Editor(p) => typed_to_map(p),
            BlockProps::Script(p) => typed_to_map(p),
            BlockProps::Run(p) => typed_to_map(p),
            BlockProps::Env(p) => typed_to_map(p),
            BlockProps::Var(p) => typed_to_map(p),
            BlockProps::LocalVar(p) => typed_to_map(p),
            BlockProps::VarDisplay(p) => typed_to_map(p),
            BlockProps::Directory(p) | BlockProps::LocalDirectory(p) => typed_to_map(p),
            BlockProps::Unknown { props, .. } => prop_map_to_json(props),
        }
    }

    /// Keys of a typed variant that only hold their serde default, i.e.
    /// leaving the key out materializes the same value. Always empty for
    /// the open record, which keeps exactly the keys it was given.
    pub fn defaulted_keys(&self) -> Vec<String> {
        if self.is_unknown() {
            return Vec::new();
        }
        let full = self.to_json_map();
        full.iter()
            .filter(|(key, value)| {
                let without: PropMap = full
                    .iter()
                    .filter(|(k, _)| k != key)
                    .map(|(k, v)| (k.clone(), PropValue::Json(v.clone())))
                    .collect();
                BlockProps::materialize(self.tag(), &without)
                    .is_some_and(|p| p.to_json_map().get(key.as_str()) == Some(*value))
            })
            .map(|(key, _)| key.clone())
            .collect()
    }
}

fn typed<P: DeserializeOwned>(props: &PropMap) -> Option<P> {
    serde_json::from_value(Value::Object(prop_map_to_json(props))).ok()
}

fn typed_to_map<P: Serialize>(props: &P) -> Map<String, Value> {
    match serde_json::to_value(props) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextStyles {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub code: bool,
}

/// One inline element of a block's content.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineContent {
    Text { text: String, styles: TextStyles },
    RunbookLink { props: Map<String, Value> },
    /// Any other element, kept verbatim.
    Other(Value),
}

impl InlineContent {
    pub fn text(text: impl Into<String>) -> Self {
        InlineContent::Text {
            text: text.into(),
            styles: TextStyles::default(),
        }
    }

    pub fn styled(text: impl Into<String>, styles: TextStyles) -> Self {
        InlineContent::Text {
            text: text.into(),
            styles,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            InlineContent::Text { text, styles } => json!({
                "type": "text",
                "text": text,
                "styles": styles,
            }),
            InlineContent::RunbookLink { props } => json!({
                "type": "runbook-link",
                "props": props,
            }),
            InlineContent::Other(v) => v.clone(),
        }
    }
}

/// A node of the document's content tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: Uuid,
    pub props: BlockProps,
    pub content: Vec<InlineContent>,
    pub children: Vec<Block>,
}

impl Block {
    pub fn new(id: Uuid, props: BlockProps) -> Self {
        Self {
            id,
            props,
            content: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: Vec<InlineContent>) -> Self {
        self.content = content;
        self
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    /// The block's type tag.
    pub fn kind(&self) -> &str {
        self.props.tag()
    }

    /// Look up a prop by wire key, regardless of representation.
    pub fn prop(&self, key: &str) -> Option<PropValue> {
        match &self.props {
            BlockProps::Unknown { props, .. } => props.get(key).cloned(),
            typed => typed.to_json_map().remove(key).map(PropValue::Json),
        }
    }

    pub fn content_value(&self) -> Value {
        Value::Array(self.content.iter().map(InlineContent::to_value).collect())
    }

    /// Wire mapping `{id, type, props, content, children}`.
    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id.to_string(),
            "type": self.kind(),
            "props": self.props.to_json_map(),
            "content": self.content_value(),
            "children": self.children.iter().map(Block::to_value).collect::<Vec<_>>(),
        })
    }
}
