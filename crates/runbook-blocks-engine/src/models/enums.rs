use serde::{Deserialize, Serialize};

/// A closed set of tokens that props may hold under fixed keys.
///
/// Lookup is by value first (`"center"`), then by symbolic name (`"Center"`),
/// both case-insensitive after trimming.
pub trait EnumFamily: Copy + Sized + 'static {
    /// Family name used in error messages.
    const FAMILY: &'static str;

    fn variants() -> &'static [Self];

    /// Canonical wire token.
    fn value(self) -> &'static str;

    /// Symbolic (Rust variant) name.
    fn symbol(self) -> &'static str;

    fn from_token(raw: &str) -> Option<Self> {
        let token = raw.trim().to_lowercase();
        Self::variants()
            .iter()
            .copied()
            .find(|v| v.value() == token)
            .or_else(|| {
                Self::variants()
                    .iter()
                    .copied()
                    .find(|v| v.symbol().to_lowercase() == token)
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl EnumFamily for TextAlignment {
    const FAMILY: &'static str = "TextAlignment";

    fn variants() -> &'static [Self] {
        &[Self::Left, Self::Center, Self::Right, Self::Justify]
    }

    fn value(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Center => "Center",
            Self::Right => "Right",
            Self::Justify => "Justify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    #[default]
    Default,
    Muted,
    Accent,
    Primary,
    Secondary,
    Success,
    Warning,
    Danger,
    Info,
}

impl EnumFamily for ColorToken {
    const FAMILY: &'static str = "ColorToken";

    fn variants() -> &'static [Self] {
        &[
            Self::Default,
            Self::Muted,
            Self::Accent,
            Self::Primary,
            Self::Secondary,
            Self::Success,
            Self::Warning,
            Self::Danger,
            Self::Info,
        ]
    }

    fn value(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Muted => "muted",
            Self::Accent => "accent",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Muted => "Muted",
            Self::Accent => "Accent",
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Danger => "Danger",
            Self::Info => "Info",
        }
    }
}

/// Which enum family a fixed prop key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumKind {
    Alignment,
    Color,
}

impl EnumKind {
    pub fn family(self) -> &'static str {
        match self {
            EnumKind::Alignment => TextAlignment::FAMILY,
            EnumKind::Color => ColorToken::FAMILY,
        }
    }
}

/// Prop keys whose values must be enum tokens, in both the camelCase wire
/// spelling and the snake_case spelling.
pub const ENUM_KEYS: &[(&str, EnumKind)] = &[
    ("textAlignment", EnumKind::Alignment),
    ("text_alignment", EnumKind::Alignment),
    ("textAlign", EnumKind::Alignment),
    ("textColor", EnumKind::Color),
    ("text_color", EnumKind::Color),
    ("backgroundColor", EnumKind::Color),
    ("background_color", EnumKind::Color),
    ("color", EnumKind::Color),
];

pub fn enum_kind_for_key(key: &str) -> Option<EnumKind> {
    ENUM_KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, kind)| *kind)
}
