//! Leaf collection and node lookup over materialized forests.

use flat_tree_model::{
    strict_identifier_from_value, FieldSchema, Identifier, RecordExt, SchemaViolation,
};

use crate::config::LeafMode;
use crate::error::TreeResult;
use crate::traits::HierarchyNode;

/// Pre-order queries over a forest of [`HierarchyNode`]s.
///
/// # Example
///
/// ```rust
/// use flat_tree::{LeafMode, TreeQuery};
/// use flat_tree_model::FieldSchema;
/// use serde_json::json;
///
/// let forest = json!([
///     {"id": 1, "children": [
///         {"id": 2, "children": []},
///         {"id": 3, "children": [{"id": 6, "children": []}]}
///     ]}
/// ]);
/// let nodes = forest.as_array().unwrap();
///
/// let schema = FieldSchema::default();
/// let query = TreeQuery::new(&schema).with_mode(LeafMode::Strict);
///
/// assert_eq!(query.leaf_ids(nodes).unwrap(), vec![2, 6]);
/// assert!(query.find_node(nodes, 3).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct TreeQuery<'s> {
    schema: &'s FieldSchema,
    mode: LeafMode,
}

impl<'s> TreeQuery<'s> {
    /// Creates a query in [`LeafMode::Lenient`].
    pub fn new(schema: &'s FieldSchema) -> Self {
        Self {
            schema,
            mode: LeafMode::default(),
        }
    }

    /// Sets the leaf collection mode.
    pub fn with_mode(mut self, mode: LeafMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the leaf collection mode.
    pub fn mode(&self) -> LeafMode {
        self.mode
    }

    /// Collects the ids of every leaf, in pre-order.
    ///
    /// A leaf is a node whose children field is absent or empty. A node
    /// whose children field holds anything other than a sequence is
    /// malformed; it is neither collected nor descended in either mode.
    ///
    /// # Errors
    ///
    /// In [`LeafMode::Lenient`] a leaf without a readable primary key is a
    /// [`SchemaViolation::NodeWithoutKey`]. [`LeafMode::Strict`] never fails;
    /// it skips such nodes together with their subtrees.
    pub fn leaf_ids<N: HierarchyNode>(&self, forest: &[N]) -> TreeResult<Vec<Identifier>> {
        let mut leaves = Vec::new();
        match self.mode {
            LeafMode::Strict => self.strict_leaves(forest, &mut leaves),
            LeafMode::Lenient => self.lenient_leaves(forest, &mut leaves)?,
        }
        Ok(leaves)
    }

    /// Finds the first node, in pre-order, whose primary key is `target`.
    ///
    /// The returned node still carries its own subtree.
    pub fn find_node<'t, N: HierarchyNode>(&self, forest: &'t [N], target: Identifier) -> Option<&'t N> {
        for node in forest {
            let id = node
                .record()
                .and_then(|record| record.identifier(&self.schema.primary_key));
            if id == Some(target) {
                return Some(node);
            }

            if let Some(found) = node
                .child_nodes(&self.schema.children_field)
                .and_then(|children| self.find_node(children, target))
            {
                return Some(found);
            }
        }
        None
    }

    fn strict_leaves<N: HierarchyNode>(&self, nodes: &[N], leaves: &mut Vec<Identifier>) {
        for node in nodes {
            let Some(id) = node
                .record()
                .and_then(|record| record.present(&self.schema.primary_key))
                .and_then(strict_identifier_from_value)
            else {
                tracing::trace!("skipping node without an integer key");
                continue;
            };
            if node.has_malformed_children(&self.schema.children_field) {
                tracing::trace!(id, "skipping node with malformed children");
                continue;
            }

            match self.non_empty_children(node) {
                Some(children) => self.strict_leaves(children, leaves),
                None => leaves.push(id),
            }
        }
    }

    fn lenient_leaves<N: HierarchyNode>(
        &self,
        nodes: &[N],
        leaves: &mut Vec<Identifier>,
    ) -> TreeResult<()> {
        for node in nodes {
            if node.has_malformed_children(&self.schema.children_field) {
                tracing::trace!("skipping node with malformed children");
                continue;
            }

            match self.non_empty_children(node) {
                Some(children) => self.lenient_leaves(children, leaves)?,
                None => {
                    let id = node
                        .record()
                        .and_then(|record| record.identifier(&self.schema.primary_key))
                        .ok_or_else(|| SchemaViolation::NodeWithoutKey {
                            field: self.schema.primary_key.clone(),
                        })?;
                    leaves.push(id);
                }
            }
        }
        Ok(())
    }

    fn non_empty_children<'n, N: HierarchyNode>(&self, node: &'n N) -> Option<&'n [N]> {
        node.child_nodes(&self.schema.children_field)
            .filter(|children| !children.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TreeError;
    use serde_json::{json, Value};

    /// ```text
    ///      1          6      8
    ///     / \         |
    ///    2   3        7
    ///       / \
    ///      4   5
    /// ```
    fn create_test_forest() -> Value {
        json!([
            {"id": 1, "label": "Node 1", "children": [
                {"id": 2, "label": "Node 2", "children": []},
                {"id": 3, "label": "Node 3", "children": [
                    {"id": 4, "label": "Node 4", "children": []},
                    {"id": 5, "label": "Node 5", "children": []}
                ]}
            ]},
            {"id": 6, "label": "Node 6", "children": [
                {"id": 7, "label": "Node 7", "children": []}
            ]},
            {"id": 8, "label": "Node 8", "children": []}
        ])
    }

    fn nodes(forest: &Value) -> &[Value] {
        forest.as_array().unwrap()
    }

    #[test]
    fn test_leaf_ids_lenient() {
        let forest = create_test_forest();
        let schema = FieldSchema::default();
        let leaves = TreeQuery::new(&schema).leaf_ids(nodes(&forest)).unwrap();
        assert_eq!(leaves, vec![2, 4, 5, 7, 8]);
    }

    #[test]
    fn test_leaf_ids_strict_same_on_clean_input() {
        let forest = create_test_forest();
        let schema = FieldSchema::default();
        let leaves = TreeQuery::new(&schema)
            .with_mode(LeafMode::Strict)
            .leaf_ids(nodes(&forest))
            .unwrap();
        assert_eq!(leaves, vec![2, 4, 5, 7, 8]);
    }

    #[test]
    fn test_leaf_without_children_field() {
        let forest = json!([{"id": 1, "children": [{"id": 2}, {"id": 3}]}]);
        let schema = FieldSchema::default();
        let leaves = TreeQuery::new(&schema).leaf_ids(nodes(&forest)).unwrap();
        assert_eq!(leaves, vec![2, 3]);
    }

    #[test]
    fn test_strict_skips_invalid_nodes() {
        let forest = json!([
            "not a node",
            {"label": "no id", "children": [{"id": 10}]},
            {"id": "11"},
            {"id": 12, "children": [42, {"id": 13}]}
        ]);
        let schema = FieldSchema::default();
        let leaves = TreeQuery::new(&schema)
            .with_mode(LeafMode::Strict)
            .leaf_ids(nodes(&forest))
            .unwrap();
        assert_eq!(leaves, vec![13]);
    }

    #[test]
    fn test_malformed_children_are_not_leaves() {
        let forest = json!([
            {"id": 5, "children": "x"},
            {"id": 6, "children": {"id": 7}}
        ]);
        let schema = FieldSchema::default();

        for mode in [LeafMode::Strict, LeafMode::Lenient] {
            let leaves = TreeQuery::new(&schema)
                .with_mode(mode)
                .leaf_ids(nodes(&forest))
                .unwrap();
            assert!(leaves.is_empty(), "{mode:?} collected {leaves:?}");
        }
    }

    #[test]
    fn test_malformed_children_skip_only_that_node() {
        let forest = json!([
            {"id": 1, "children": [
                {"id": 2, "children": "x"},
                {"id": 3, "children": null},
                {"id": 4, "children": {"id": 9}}
            ]},
            {"id": 5}
        ]);
        let schema = FieldSchema::default();

        for mode in [LeafMode::Strict, LeafMode::Lenient] {
            let leaves = TreeQuery::new(&schema)
                .with_mode(mode)
                .leaf_ids(nodes(&forest))
                .unwrap();
            assert_eq!(leaves, vec![3, 5], "{mode:?}");
        }
    }

    #[test]
    fn test_lenient_accepts_string_keys() {
        let forest = json!([{"id": "11"}, {"id": 12}]);
        let schema = FieldSchema::default();
        let leaves = TreeQuery::new(&schema).leaf_ids(nodes(&forest)).unwrap();
        assert_eq!(leaves, vec![11, 12]);
    }

    #[test]
    fn test_lenient_descends_through_keyless_branch() {
        let forest = json!([{"label": "group", "children": [{"id": 3}]}]);
        let schema = FieldSchema::default();
        let leaves = TreeQuery::new(&schema).leaf_ids(nodes(&forest)).unwrap();
        assert_eq!(leaves, vec![3]);
    }

    #[test]
    fn test_lenient_rejects_keyless_leaf() {
        let forest = json!([{"id": 1}, "scalar"]);
        let schema = FieldSchema::default();
        let err = TreeQuery::new(&schema).leaf_ids(nodes(&forest)).unwrap_err();
        assert_eq!(
            err,
            TreeError::SchemaViolation(SchemaViolation::NodeWithoutKey {
                field: "id".to_string(),
            })
        );
    }

    #[test]
    fn test_leaf_ids_custom_keys() {
        let forest = json!([
            {"node_id": 1, "sub_nodes": [{"node_id": 2, "sub_nodes": []}]}
        ]);
        let schema = FieldSchema::builder()
            .with_primary_key("node_id")
            .with_children_field("sub_nodes")
            .build();
        let leaves = TreeQuery::new(&schema).leaf_ids(nodes(&forest)).unwrap();
        assert_eq!(leaves, vec![2]);
    }

    #[test]
    fn test_find_existing_node() {
        let forest = json!([
            {"id": 1, "label": "Node 1", "children": [
                {"id": 2, "label": "Node 2", "children": []},
                {"id": 3, "label": "Node 3", "children": [
                    {"id": 4, "label": "Node 4", "children": []}
                ]}
            ]},
            {"id": 5, "label": "Node 5", "children": []}
        ]);
        let schema = FieldSchema::default();
        let found = TreeQuery::new(&schema).find_node(nodes(&forest), 4);
        assert_eq!(
            found,
            Some(&json!({"id": 4, "label": "Node 4", "children": []}))
        );
    }

    #[test]
    fn test_find_returns_subtree() {
        let forest = create_test_forest();
        let schema = FieldSchema::default();
        let found = TreeQuery::new(&schema)
            .find_node(nodes(&forest), 3)
            .unwrap();
        assert_eq!(found.child_nodes("children").map(<[Value]>::len), Some(2));
    }

    #[test]
    fn test_find_missing_node() {
        let forest = create_test_forest();
        let schema = FieldSchema::default();
        assert!(TreeQuery::new(&schema)
            .find_node(nodes(&forest), 999)
            .is_none());
    }

    #[test]
    fn test_find_in_empty_forest() {
        let schema = FieldSchema::default();
        let empty: Vec<Value> = Vec::new();
        assert!(TreeQuery::new(&schema).find_node(&empty, 1).is_none());
    }

    #[test]
    fn test_find_checks_parent_before_children() {
        // Both the parent and its child claim id 7; the parent wins.
        let forest = json!([{"id": 7, "label": "outer", "children": [{"id": 7, "label": "inner"}]}]);
        let schema = FieldSchema::default();
        let found = TreeQuery::new(&schema)
            .find_node(nodes(&forest), 7)
            .unwrap();
        assert_eq!(found["label"], json!("outer"));
    }

    #[test]
    fn test_find_custom_keys() {
        let forest = json!([
            {"node_id": 1, "sub_nodes": [
                {"node_id": 4, "node_label": "Node 4", "sub_nodes": []}
            ]}
        ]);
        let schema = FieldSchema::builder()
            .with_primary_key("node_id")
            .with_children_field("sub_nodes")
            .build();
        let found = TreeQuery::new(&schema).find_node(nodes(&forest), 4);
        assert_eq!(
            found,
            Some(&json!({"node_id": 4, "node_label": "Node 4", "sub_nodes": []}))
        );
    }

    #[test]
    fn test_find_skips_scalar_nodes() {
        let forest = json!([3, {"id": 3}]);
        let schema = FieldSchema::default();
        let found = TreeQuery::new(&schema).find_node(nodes(&forest), 3);
        assert_eq!(found, Some(&json!({"id": 3})));
    }
}
