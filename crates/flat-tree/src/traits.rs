//! Node access for materialized forests.
//!
//! The query layer reads forests through [`HierarchyNode`] so the same
//! traversal serves both typed [`TreeNode`] forests and raw JSON forests
//! (for example, one deserialized from a request body).
//!
//! # Example: querying a JSON forest
//!
//! ```rust
//! use flat_tree::TreeQuery;
//! use flat_tree_model::FieldSchema;
//! use serde_json::json;
//!
//! let forest = json!([{"id": 1, "children": [{"id": 2}]}]);
//! let nodes = forest.as_array().unwrap();
//!
//! let schema = FieldSchema::default();
//! assert_eq!(TreeQuery::new(&schema).leaf_ids(nodes).unwrap(), vec![2]);
//! ```

use flat_tree_model::{FlatRecord, TreeNode};
use serde_json::Value;

/// A node in a materialized forest.
pub trait HierarchyNode: Sized {
    /// The node's fields, or `None` if the node is not a record.
    fn record(&self) -> Option<&FlatRecord>;

    /// The node's children under `children_field`.
    ///
    /// Returns `None` when the field is absent or is not a sequence.
    fn child_nodes(&self, children_field: &str) -> Option<&[Self]>;

    /// Returns true if `children_field` is present but holds something
    /// other than a sequence. Such a node is neither a leaf nor a branch.
    ///
    /// `null` counts as absent.
    fn has_malformed_children(&self, _children_field: &str) -> bool {
        false
    }
}

impl HierarchyNode for TreeNode {
    fn record(&self) -> Option<&FlatRecord> {
        Some(&self.record)
    }

    // Children live outside the record, so the field name is irrelevant.
    fn child_nodes(&self, _children_field: &str) -> Option<&[Self]> {
        self.children.as_deref()
    }
}

impl HierarchyNode for Value {
    fn record(&self) -> Option<&FlatRecord> {
        self.as_object()
    }

    fn child_nodes(&self, children_field: &str) -> Option<&[Self]> {
        self.as_object()?
            .get(children_field)?
            .as_array()
            .map(Vec::as_slice)
    }

    fn has_malformed_children(&self, children_field: &str) -> bool {
        self.as_object()
            .and_then(|object| object.get(children_field))
            .is_some_and(|children| !children.is_null() && !children.is_array())
    }
}
