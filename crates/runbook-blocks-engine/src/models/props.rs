use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::dependency::DependencySpec;
use super::enums::{ColorToken, EnumFamily, TextAlignment};

/// A single value in an open property record.
///
/// Enum-keyed props hold `Alignment`/`Color` once coerced; everything else
/// is kept as the raw JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Alignment(TextAlignment),
    Color(ColorToken),
    Json(Value),
}

impl PropValue {
    pub fn to_json(&self) -> Value {
        match self {
            PropValue::Alignment(a) => Value::String(a.value().to_string()),
            PropValue::Color(c) => Value::String(c.value().to_string()),
            PropValue::Json(v) => v.clone(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Alignment(a) => Some(a.value()),
            PropValue::Color(c) => Some(c.value()),
            PropValue::Json(v) => v.as_str(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Json(Value::Null))
    }
}

impl From<Value> for PropValue {
    fn from(v: Value) -> Self {
        PropValue::Json(v)
    }
}

impl From<TextAlignment> for PropValue {
    fn from(a: TextAlignment) -> Self {
        PropValue::Alignment(a)
    }
}

impl From<ColorToken> for PropValue {
    fn from(c: ColorToken) -> Self {
        PropValue::Color(c)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Json(Value::String(s.to_string()))
    }
}

/// Open property record, keyed by wire name.
pub type PropMap = BTreeMap<String, PropValue>;

pub fn prop_map_to_json(props: &PropMap) -> serde_json::Map<String, Value> {
    props
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect()
}

fn default_true() -> bool {
    true
}

fn default_level() -> i64 {
    1
}

fn default_dependency() -> String {
    "{}".to_string()
}

fn default_interpreter() -> String {
    "bash".to_string()
}

fn default_language() -> String {
    "python".to_string()
}

// Typed records reject unknown keys so that materializing a block never
// drops data; a block with extra keys stays in the open representation.

/// Props shared by text-like blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextProps {
    #[serde(rename = "textColor", alias = "text_color", default)]
    pub text_color: ColorToken,
    #[serde(rename = "backgroundColor", alias = "background_color", default)]
    pub background_color: ColorToken,
    #[serde(
        rename = "textAlignment",
        alias = "text_alignment",
        alias = "textAlign",
        default
    )]
    pub text_alignment: TextAlignment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadingProps {
    /// Range is checked by the validator, not here.
    #[serde(default = "default_level")]
    pub level: i64,
    #[serde(rename = "isToggleable", alias = "is_toggleable", default)]
    pub is_toggleable: bool,
    #[serde(rename = "textColor", alias = "text_color", default)]
    pub text_color: ColorToken,
    #[serde(rename = "backgroundColor", alias = "background_color", default)]
    pub background_color: ColorToken,
    #[serde(
        rename = "textAlignment",
        alias = "text_alignment",
        alias = "textAlign",
        default
    )]
    pub text_alignment: TextAlignment,
}

impl Default for HeadingProps {
    fn default() -> Self {
        Self {
            level: 1,
            is_toggleable: false,
            text_color: ColorToken::Default,
            background_color: ColorToken::Default,
            text_alignment: TextAlignment::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckListProps {
    #[serde(default)]
    pub checked: bool,
    #[serde(rename = "textColor", alias = "text_color", default)]
    pub text_color: ColorToken,
    #[serde(rename = "backgroundColor", alias = "background_color", default)]
    pub background_color: ColorToken,
    #[serde(
        rename = "textAlignment",
        alias = "text_alignment",
        alias = "textAlign",
        default
    )]
    pub text_alignment: TextAlignment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeBlockProps {
    pub language: String,
}

/// Horizontal rules carry no props at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HorizontalRuleProps {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditorProps {
    pub name: String,
    pub code: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(rename = "variableName", alias = "variable_name", default)]
    pub variable_name: String,
    #[serde(rename = "syncVariable", alias = "sync_variable", default)]
    pub sync_variable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptProps {
    pub name: String,
    pub code: String,
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    #[serde(rename = "outputVariable", alias = "output_variable", default)]
    pub output_variable: String,
    #[serde(
        rename = "outputVisible",
        alias = "output_visible",
        default = "default_true"
    )]
    pub output_visible: bool,
    /// JSON-object string, see [`DependencySpec`](super::DependencySpec).
    #[serde(default = "default_dependency")]
    pub dependency: String,
}

impl ScriptProps {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            interpreter: default_interpreter(),
            output_variable: String::new(),
            output_visible: true,
            dependency: default_dependency(),
        }
    }

    pub fn dependency_spec(&self) -> Result<DependencySpec, serde_json::Error> {
        DependencySpec::from_json_str(&self.dependency)
    }
}

/// Terminal ("run") block props.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunProps {
    pub name: String,
    pub code: String,
    /// Terminal type, e.g. `bash` or `ssh`.
    #[serde(rename = "type", default = "default_interpreter")]
    pub terminal_type: String,
    #[serde(default)]
    pub pty: String,
    #[serde(rename = "global", default)]
    pub global: bool,
    #[serde(
        rename = "outputVisible",
        alias = "output_visible",
        default = "default_true"
    )]
    pub output_visible: bool,
    #[serde(default = "default_dependency")]
    pub dependency: String,
}

impl RunProps {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            terminal_type: default_interpreter(),
            pty: String::new(),
            global: false,
            output_visible: true,
            dependency: default_dependency(),
        }
    }

    pub fn dependency_spec(&self) -> Result<DependencySpec, serde_json::Error> {
        DependencySpec::from_json_str(&self.dependency)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvProps {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VarProps {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalVarProps {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VarDisplayProps {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryProps {
    pub path: String,
}
