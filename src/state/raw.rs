//! Field coercion helpers for loosely-structured documents.
//!
//! Hand-edited state files are user data: a malformed field is corrected to
//! a safe default, never rejected. Strings accept numeric and boolean
//! stringification, anything else coerces to empty; booleans accept only
//! JSON booleans.

use std::sync::LazyLock;

use serde_json::{Map, Value};

static EMPTY_OBJECT: LazyLock<Map<String, Value>> = LazyLock::new(Map::new);

/// Object view of a raw document. Absent and non-object documents read as
/// the empty object.
pub fn document(raw: Option<&Value>) -> &Map<String, Value> {
    raw.and_then(Value::as_object).unwrap_or(&*EMPTY_OBJECT)
}

/// Object view of a single list entry; non-objects read as empty.
pub fn entry(value: &Value) -> &Map<String, Value> {
    value.as_object().unwrap_or(&*EMPTY_OBJECT)
}

/// Coerce a JSON value to a string. Objects, arrays, and null coerce to
/// the empty string.
pub fn coerce_str(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Trimmed string field, empty when missing or malformed.
pub fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .map(coerce_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Identifier field, kept verbatim; `None` when missing or blank so the
/// caller can assign a stable default.
pub fn id_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    let id = obj.get(key).map(coerce_str).unwrap_or_default();
    if id.is_empty() { None } else { Some(id) }
}

/// Boolean field; absent or malformed entries are `false`.
pub fn bool_field(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// List field; missing or non-list values read as empty.
pub fn list_field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|v| v.as_slice())
        .unwrap_or(&[])
}
