//! Loose access to untyped remote table rows.
//!
//! Rows arrive as free-form JSON objects: fields are optional, numbers may
//! be strings, and relation fields show up in four different shapes
//! depending on how the table was configured upstream. Every shape is
//! enumerated explicitly here so that none is handled by accident.

use serde_json::{json, Value};

/// The raw shapes a relation field can take in a remote row.
///
/// A relation references rows of another table and may arrive as a list
/// of link objects, a single link object, a bare scalar id, or be absent
/// entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationShape<'a> {
    /// Field missing or JSON null.
    Absent,
    /// A single link object, e.g. `{"id": 3, "value": "M"}`.
    Single(&'a Value),
    /// A list of link objects.
    List(&'a [Value]),
    /// A bare scalar id, e.g. `3` or `"3"`.
    Scalar(&'a Value),
}

impl<'a> RelationShape<'a> {
    /// Classify the raw value of a relation field.
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => RelationShape::Absent,
            Some(Value::Array(items)) => RelationShape::List(items),
            Some(v @ Value::Object(_)) => RelationShape::Single(v),
            Some(scalar) => RelationShape::Scalar(scalar),
        }
    }
}

/// JSON truthiness, matching the upstream service's coercion rules.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0 && !v.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Normalize a relation field into a uniform list of link objects.
///
/// - a list is kept as-is, dropping falsy entries;
/// - a single object is wrapped in a one-element list;
/// - an absent/null field yields an empty list;
/// - a bare scalar is wrapped as `{"id": scalar}`.
pub fn normalize_links(value: Option<&Value>) -> Vec<Value> {
    match RelationShape::of(value) {
        RelationShape::Absent => Vec::new(),
        RelationShape::List(items) => items.iter().filter(|v| is_truthy(v)).cloned().collect(),
        RelationShape::Single(obj) => vec![obj.clone()],
        RelationShape::Scalar(scalar) => vec![json!({ "id": scalar.clone() })],
    }
}

/// Normalize a loosely typed text field: trimmed non-empty strings pass,
/// numbers are stringified, everything else is treated as absent.
pub fn normalize_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce a loosely typed field into a boolean.
pub fn normalize_flag(value: Option<&Value>) -> bool {
    value.map(is_truthy).unwrap_or(false)
}
