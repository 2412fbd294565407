//! Enum coercion for property records.
//!
//! Runs before any structural check so later stages only ever see
//! `PropValue::Alignment`/`PropValue::Color` under enum-keyed props.
//! Unlisted keys pass through untouched. Nothing is defaulted here: a bad
//! token is an error.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::models::{
    ColorToken, EnumFamily, EnumKind, PropMap, PropValue, TextAlignment, enum_kind_for_key,
};

use super::value::{PREVIEW_LEN, preview};

/// Coerce a raw props mapping into an open property record.
pub fn coerce_props(raw: &Map<String, Value>, path: &str) -> Result<PropMap, ValidationError> {
    raw.iter()
        .map(|(key, value)| {
            let coerced = coerce_value(key, PropValue::Json(value.clone()), path)?;
            Ok((key.clone(), coerced))
        })
        .collect()
}

/// Coerce every enum-keyed entry of an existing record in place.
pub fn coerce_prop_map(props: PropMap, path: &str) -> Result<PropMap, ValidationError> {
    props
        .into_iter()
        .map(|(key, value)| {
            let coerced = coerce_value(&key, value, path)?;
            Ok((key, coerced))
        })
        .collect()
}

/// Coerce one prop. Canonical values are accepted as-is; strings are
/// resolved case-insensitively; anything else fails.
pub fn coerce_value(key: &str, value: PropValue, path: &str) -> Result<PropValue, ValidationError> {
    let Some(kind) = enum_kind_for_key(key) else {
        return Ok(value);
    };
    if value.is_null() {
        return Ok(value);
    }

    let resolved = match (kind, &value) {
        (EnumKind::Alignment, PropValue::Alignment(_)) | (EnumKind::Color, PropValue::Color(_)) => {
            Some(value.clone())
        }
        (EnumKind::Alignment, PropValue::Json(Value::String(s))) => {
            TextAlignment::from_token(s).map(PropValue::Alignment)
        }
        (EnumKind::Color, PropValue::Json(Value::String(s))) => {
            ColorToken::from_token(s).map(PropValue::Color)
        }
        _ => None,
    };

    resolved.ok_or_else(|| ValidationError::InvalidEnumValue {
        path: path.to_string(),
        key: key.to_string(),
        value: preview(&value.to_json(), PREVIEW_LEN),
        family: kind.family(),
    })
}
