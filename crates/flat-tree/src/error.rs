//! Error types for hierarchy materialization and queries.

use flat_tree_model::{Identifier, SchemaViolation};
use thiserror::Error;

/// Errors that can occur while building or walking a hierarchy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A record lacks a field the schema requires.
    #[error("schema violation: {0}")]
    SchemaViolation(#[from] SchemaViolation),

    /// A walk revisited an id already on its current path.
    #[error("cycle detected at id {id}")]
    CycleDetected {
        /// The id that was reached twice.
        id: Identifier,
    },
}

/// Result type for hierarchy operations.
pub type TreeResult<T> = std::result::Result<T, TreeError>;
