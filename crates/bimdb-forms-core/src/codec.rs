#![forbid(unsafe_code)]

//! Wire codecs for the two backing-field formats.
//!
//! - Property lists travel as a JSON object of string to string.
//! - Ordered lists travel as newline-joined text; pieces are trimmed and
//!   blank pieces dropped on the way in.
//!
//! A list value containing `\n` cannot round-trip: it is indistinguishable
//! from a row separator.

use serde_json::{Map, Value};

use crate::error::FormError;

/// Row separator of the ordered-list wire format.
pub const LIST_SEPARATOR: char = '\n';

// ---------------------------------------------------------------------------
// Property lists
// ---------------------------------------------------------------------------

/// Parse a property-list backing value into `(key, value)` pairs in
/// document order.
///
/// String values are taken verbatim, `null` becomes the empty string and
/// any other value is rendered as its compact JSON text.
pub fn decode_properties(raw: &str) -> Result<Vec<(String, String)>, FormError> {
    let parsed: Value = serde_json::from_str(raw).map_err(FormError::InvalidJson)?;
    let Value::Object(map) = parsed else {
        return Err(FormError::NotAnObject {
            found: json_type_name(&parsed),
        });
    };
    Ok(map
        .into_iter()
        .map(|(key, value)| (key, property_text(value)))
        .collect())
}

/// Serialize `(key, value)` pairs into a JSON object.
///
/// A repeated key keeps the position of its first occurrence and the value
/// of its last.
#[must_use]
pub fn encode_properties<K, V, I>(pairs: I) -> String
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = Map::new();
    for (key, value) in pairs {
        map.insert(key.into(), Value::String(value.into()));
    }
    Value::Object(map).to_string()
}

fn property_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Ordered lists
// ---------------------------------------------------------------------------

/// Split an ordered-list backing value into trimmed, non-empty entries.
#[must_use]
pub fn decode_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Join entries with the list separator.
///
/// Entries are written as given; trimming only happens on decode.
#[must_use]
pub fn encode_list<S, I>(values: I) -> String
where
    S: AsRef<str>,
    I: IntoIterator<Item = S>,
{
    let mut out = String::new();
    for (idx, value) in values.into_iter().enumerate() {
        if idx > 0 {
            out.push(LIST_SEPARATOR);
        }
        out.push_str(value.as_ref());
    }
    out
}
