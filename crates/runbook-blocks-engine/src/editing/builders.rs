//! Authoring new blocks.
//!
//! A [`BlockDraft`] is a block in wire shape that has not been through the
//! parser yet. Enum props may still hold loose tokens such as `"CENTER"`;
//! they are coerced when the draft is materialized.

use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::models::{
    BlockProps, DependencySpec, DirectoryProps, EnvProps, HeadingProps, InlineContent, RunProps,
    ScriptProps, TextProps, TextStyles, VarProps,
};

use super::ids::IdGenerator;

#[derive(Debug, Clone, PartialEq)]
pub struct BlockDraft {
    pub id: Uuid,
    pub kind: String,
    pub props: Map<String, Value>,
    pub content: Vec<Value>,
    pub children: Vec<BlockDraft>,
}

impl BlockDraft {
    pub fn new(id: Uuid, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            props: Map::new(),
            content: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Alignment token, coerced on materialization.
    pub fn with_alignment(self, token: &str) -> Self {
        self.with_prop("textAlignment", token)
    }

    pub fn with_text_color(self, token: &str) -> Self {
        self.with_prop("textColor", token)
    }

    pub fn with_background_color(self, token: &str) -> Self {
        self.with_prop("backgroundColor", token)
    }

    pub fn with_children(mut self, children: Vec<BlockDraft>) -> Self {
        self.children = children;
        self
    }

    /// Wire mapping, ready for [`Parser::parse_block`](crate::parsing::Parser::parse_block).
    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id.to_string(),
            "type": self.kind,
            "props": self.props,
            "content": self.content,
            "children": self.children.iter().map(BlockDraft::to_value).collect::<Vec<_>>(),
        })
    }
}

/// Builds drafts with ids from an injected generator.
#[derive(Debug, Clone)]
pub struct BlockBuilder<G> {
    ids: G,
}

impl<G: IdGenerator> BlockBuilder<G> {
    pub fn new(ids: G) -> Self {
        Self { ids }
    }

    fn draft(&mut self, props: BlockProps, content: Vec<Value>) -> BlockDraft {
        BlockDraft {
            id: self.ids.generate(),
            kind: props.tag().to_string(),
            props: props.to_json_map(),
            content,
            children: Vec::new(),
        }
    }

    /// Any tag with explicit props, typed or not.
    pub fn block(&mut self, kind: &str, props: Map<String, Value>) -> BlockDraft {
        BlockDraft {
            props,
            ..BlockDraft::new(self.ids.generate(), kind)
        }
    }

    pub fn paragraph(&mut self, text: &str) -> BlockDraft {
        self.paragraph_styled(text, TextStyles::default())
    }

    pub fn paragraph_styled(&mut self, text: &str, styles: TextStyles) -> BlockDraft {
        let content = text_content(text, styles);
        self.draft(BlockProps::Paragraph(TextProps::default()), content)
    }

    pub fn heading(&mut self, level: i64, text: &str) -> BlockDraft {
        let props = HeadingProps {
            level,
            ..HeadingProps::default()
        };
        let content = text_content(text, TextStyles::default());
        self.draft(BlockProps::Heading(props), content)
    }

    pub fn toggle_heading(&mut self, level: i64, text: &str) -> BlockDraft {
        let props = HeadingProps {
            level,
            is_toggleable: true,
            ..HeadingProps::default()
        };
        let content = text_content(text, TextStyles::default());
        self.draft(BlockProps::Heading(props), content)
    }

    pub fn horizontal_rule(&mut self) -> BlockDraft {
        self.draft(BlockProps::HorizontalRule, Vec::new())
    }

    pub fn script(&mut self, name: &str, code: &str) -> BlockDraft {
        self.draft(BlockProps::Script(ScriptProps::new(name, code)), Vec::new())
    }

    /// Script with an interpreter and dependencies.
    pub fn script_with(
        &mut self,
        name: &str,
        code: &str,
        interpreter: &str,
        dependency: &DependencySpec,
    ) -> BlockDraft {
        let props = ScriptProps {
            interpreter: interpreter.to_string(),
            dependency: dependency.to_json_string(),
            ..ScriptProps::new(name, code)
        };
        self.draft(BlockProps::Script(props), Vec::new())
    }

    /// Terminal block.
    pub fn run(&mut self, name: &str, code: &str) -> BlockDraft {
        self.draft(BlockProps::Run(RunProps::new(name, code)), Vec::new())
    }

    pub fn env(&mut self, name: &str, value: &str) -> BlockDraft {
        let props = EnvProps {
            name: name.to_string(),
            value: value.to_string(),
        };
        self.draft(BlockProps::Env(props), Vec::new())
    }

    pub fn var(&mut self, name: &str, value: &str) -> BlockDraft {
        let props = VarProps {
            name: name.to_string(),
            value: value.to_string(),
        };
        self.draft(BlockProps::Var(props), Vec::new())
    }

    pub fn directory(&mut self, path: &str) -> BlockDraft {
        let props = DirectoryProps {
            path: path.to_string(),
        };
        self.draft(BlockProps::Directory(props), Vec::new())
    }

    /// Toggle list item wrapping `children`.
    pub fn toggle(&mut self, text: &str, children: Vec<BlockDraft>) -> BlockDraft {
        let content = text_content(text, TextStyles::default());
        self.draft(BlockProps::ToggleListItem(TextProps::default()), content)
            .with_children(children)
    }
}

fn text_content(text: &str, styles: TextStyles) -> Vec<Value> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![InlineContent::styled(text, styles).to_value()]
}
