//! Flat input records and identifier extraction.

use serde_json::{Map, Value};

use crate::error::{ModelResult, SchemaViolation};

/// Identifier held in primary-key and foreign-key fields.
pub type Identifier = i64;

/// One input row: an ordered mapping from field name to value.
pub type FlatRecord = Map<String, Value>;

/// Returns true if `id` is the reserved "no parent" sentinel.
///
/// Zero and every negative value terminate an upward parent walk.
pub fn is_root_sentinel(id: Identifier) -> bool {
    id <= 0
}

/// Reads an identifier from a JSON value.
///
/// Accepts JSON integers and strings holding a decimal integer, since rows
/// fetched from SQL drivers frequently carry their keys as strings.
pub fn identifier_from_value(value: &Value) -> Option<Identifier> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Reads an identifier only if the value is a JSON integer.
pub fn strict_identifier_from_value(value: &Value) -> Option<Identifier> {
    match value {
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// Field access helpers for [`FlatRecord`].
pub trait RecordExt {
    /// Returns the field's value, treating `null` as absent.
    fn present(&self, field: &str) -> Option<&Value>;

    /// Returns the field as an identifier, if present and well-formed.
    fn identifier(&self, field: &str) -> Option<Identifier>;

    /// Returns the field as an identifier, or the matching violation.
    ///
    /// `index` is the record's position in its input sequence and is only
    /// used for error reporting.
    fn require_identifier(&self, field: &str, index: usize) -> ModelResult<Identifier>;
}

impl RecordExt for FlatRecord {
    fn present(&self, field: &str) -> Option<&Value> {
        self.get(field).filter(|value| !value.is_null())
    }

    fn identifier(&self, field: &str) -> Option<Identifier> {
        self.present(field).and_then(identifier_from_value)
    }

    fn require_identifier(&self, field: &str, index: usize) -> ModelResult<Identifier> {
        let value = self
            .present(field)
            .ok_or_else(|| SchemaViolation::MissingField {
                index,
                field: field.to_string(),
            })?;

        identifier_from_value(value).ok_or_else(|| SchemaViolation::InvalidIdentifier {
            index,
            field: field.to_string(),
            found: value.to_string(),
        })
    }
}

/// Renders a field value as display text.
///
/// Strings are returned as-is; other scalars use their JSON text.
pub fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
