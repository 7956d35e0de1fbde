//! Text normalisation over the assembled JSON document.
//!
//! Strings get every whitespace run (non-breaking spaces included) collapsed to one ASCII space
//! and are trimmed. Object fields holding `null` or an empty array are removed. Array elements
//! are normalised in place but never removed. At document level the top-level sections are
//! kept even when empty.

use serde_json::{Map, Value};

/// Collapse whitespace runs to single spaces and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split(char::is_whitespace)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Return a normalised copy of `value`.
#[must_use]
pub fn normalize(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(collapse_whitespace(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::Object(fields) => Value::Object(normalize_fields(fields)),
        other => other,
    }
}

/// Normalise a whole document, keeping every top-level key.
///
/// Each top-level value is normalised on its own, so an empty section stays in the output.
/// Applying this twice gives the same result as applying it once.
#[must_use]
pub fn normalize_document(value: Value) -> Value {
    match value {
        Value::Object(sections) => Value::Object(
            sections
                .into_iter()
                .map(|(key, section)| (key, normalize(section)))
                .collect(),
        ),
        other => normalize(other),
    }
}

fn normalize_fields(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| (key, normalize(value)))
        .filter(|(_, value)| !is_prunable(value))
        .collect()
}

fn is_prunable(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/normalize.rs"]
mod tests;
