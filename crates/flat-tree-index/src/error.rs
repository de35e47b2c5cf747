//! Error types for the index crate.

use flat_tree::TreeError;
use flat_tree_model::{Identifier, SchemaViolation};

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that can occur while building or querying a [`HierarchyIndex`](crate::HierarchyIndex).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// A walk over the index failed.
    #[error("{0}")]
    Tree(#[from] TreeError),

    /// A record could not be indexed.
    #[error("cannot index records: {0}")]
    Schema(#[from] SchemaViolation),

    /// The id is neither a record key nor a parent reference.
    #[error("id {0} is not present in the index")]
    UnknownId(Identifier),
}

impl IndexError {
    /// Returns true if the error was caused by a cycle.
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Tree(TreeError::CycleDetected { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IndexError::UnknownId(42);
        assert_eq!(err.to_string(), "id 42 is not present in the index");

        let err = IndexError::from(TreeError::CycleDetected { id: 3 });
        assert_eq!(err.to_string(), "cycle detected at id 3");

        let err = IndexError::from(SchemaViolation::MissingField {
            index: 2,
            field: "id".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "cannot index records: record 2 is missing required field `id`"
        );
    }

    #[test]
    fn test_is_cycle() {
        assert!(IndexError::from(TreeError::CycleDetected { id: 1 }).is_cycle());
        assert!(!IndexError::UnknownId(1).is_cycle());
    }
}
