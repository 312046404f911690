//! Lenient deserializers for data coming back from the spreadsheet service.
//!
//! The remote side is loosely typed: booleans may arrive as strings, lists may
//! be `null`, numbers may sit where text was expected. These helpers coerce
//! what they can and drop what they cannot, so a bad payload degrades to
//! "nothing granted" rather than a parse failure.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads `true`, `"true"` (any case) as `true`; anything else as `false`.
pub fn value_as_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Renders a scalar as text. Arrays, objects and `null` become `None`.
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_bool(&value))
}

pub fn deserialize_lenient_rights<'de, D>(deserializer: D) -> Result<HashMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, v)| (key, value_as_bool(&v)))
            .collect()),
        _ => Ok(HashMap::new()),
    }
}

/// Accepts an array of names or a single comma-separated string.
pub fn deserialize_lenient_branches<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let names = match value {
        Value::Array(items) => items.iter().filter_map(value_as_text).collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };
    Ok(names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}
