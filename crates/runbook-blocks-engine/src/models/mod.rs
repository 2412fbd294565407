pub mod block;
pub mod dependency;
pub mod document;
pub mod enums;
pub mod props;

pub use block::{Block, BlockProps, InlineContent, TextStyles, tags};
pub use dependency::DependencySpec;
pub use document::Document;
pub use enums::{ColorToken, ENUM_KEYS, EnumFamily, EnumKind, TextAlignment, enum_kind_for_key};
pub use props::*;
