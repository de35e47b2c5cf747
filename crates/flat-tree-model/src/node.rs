//! Materialized tree and select-option nodes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{FlatRecord, Identifier, RecordExt};

/// A flat record with its materialized children attached.
///
/// `children` is `None` when the node carries no children field at all and
/// `Some(vec![])` when it carries an explicit empty one; which of the two a
/// leaf gets is decided by the builder configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// The record's own fields, without any children field.
    pub record: FlatRecord,
    /// Children in input order.
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Creates a node without a children field.
    pub fn new(record: FlatRecord) -> Self {
        Self {
            record,
            children: None,
        }
    }

    /// Creates a node with the given children.
    pub fn with_children(record: FlatRecord, children: Vec<TreeNode>) -> Self {
        Self {
            record,
            children: Some(children),
        }
    }

    /// Reads the node's identifier from `primary_key`.
    pub fn identifier(&self, primary_key: &str) -> Option<Identifier> {
        self.record.identifier(primary_key)
    }

    /// Returns the children, or an empty slice if the field is absent.
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Number of nodes in this subtree, including the node itself.
    pub fn subtree_size(&self) -> usize {
        1 + self.children().iter().map(TreeNode::subtree_size).sum::<usize>()
    }

    /// Pre-order iterator over this subtree.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Renders the node as a JSON object with children under `children_field`.
    pub fn to_value(&self, children_field: &str) -> Value {
        let mut map = self.record.clone();
        if let Some(children) = &self.children {
            let rendered = children
                .iter()
                .map(|child| child.to_value(children_field))
                .collect();
            map.insert(children_field.to_string(), Value::Array(rendered));
        }
        Value::Object(map)
    }
}

/// Pre-order traversal over a [`TreeNode`] subtree.
pub struct PreOrder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Renders a forest as a JSON array.
pub fn forest_to_value(forest: &[TreeNode], children_field: &str) -> Value {
    Value::Array(
        forest
            .iter()
            .map(|node| node.to_value(children_field))
            .collect(),
    )
}

/// Pre-order iterator over every node of a forest.
pub fn forest_iter(forest: &[TreeNode]) -> impl Iterator<Item = &TreeNode> {
    forest.iter().flat_map(TreeNode::iter)
}

/// A label/value node for tree-select widgets.
///
/// `children` is never serialized when empty, so leaves carry no children
/// key at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionNode {
    /// Display label.
    pub label: Value,
    /// Submitted value.
    pub value: Value,
    /// Child options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OptionNode>,
}

impl OptionNode {
    /// Creates a leaf option.
    pub fn new(label: Value, value: Value) -> Self {
        Self {
            label,
            value,
            children: Vec::new(),
        }
    }

    /// Returns true if the option has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Renders the option with children under `children_field`.
    ///
    /// Use this instead of serde when the children key is not `children`.
    pub fn to_value(&self, children_field: &str) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("label".to_string(), self.label.clone());
        map.insert("value".to_string(), self.value.clone());
        if !self.children.is_empty() {
            let rendered = self
                .children
                .iter()
                .map(|child| child.to_value(children_field))
                .collect();
            map.insert(children_field.to_string(), Value::Array(rendered));
        }
        Value::Object(map)
    }
}
