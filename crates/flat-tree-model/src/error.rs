//! Error types for record and schema validation.

use thiserror::Error;

/// A record or node does not carry the fields the active schema requires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    /// A required field is absent (or holds `null`).
    #[error("record {index} is missing required field `{field}`")]
    MissingField {
        /// Position of the record in the input sequence.
        index: usize,
        /// Name of the missing field.
        field: String,
    },

    /// A key field is present but does not hold an integer identifier.
    #[error("record {index} field `{field}` is not an identifier: {found}")]
    InvalidIdentifier {
        /// Position of the record in the input sequence.
        index: usize,
        /// Name of the offending field.
        field: String,
        /// The value found, rendered as JSON.
        found: String,
    },

    /// A materialized leaf node has no usable primary key.
    #[error("leaf node has no usable `{field}` identifier")]
    NodeWithoutKey {
        /// Name of the primary-key field.
        field: String,
    },
}

impl SchemaViolation {
    /// Returns the name of the field that caused the violation.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field, .. }
            | Self::InvalidIdentifier { field, .. }
            | Self::NodeWithoutKey { field } => field,
        }
    }

    /// Returns the input position of the offending record, if known.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::MissingField { index, .. } | Self::InvalidIdentifier { index, .. } => Some(*index),
            Self::NodeWithoutKey { .. } => None,
        }
    }
}

/// Result type for model operations.
pub type ModelResult<T> = std::result::Result<T, SchemaViolation>;
