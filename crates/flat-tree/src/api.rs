//! One-call entry points for each hierarchy operation.
//!
//! Each function constructs the matching component and delegates to it; use
//! the components directly when issuing several calls with one schema.

use flat_tree_model::{FieldSchema, FlatRecord, Identifier, OptionNode, TreeNode};

use crate::ancestors::AncestorResolver;
use crate::builder::TreeBuilder;
use crate::config::{BuildConfig, LeafMode};
use crate::descendants::DescendantCollector;
use crate::error::TreeResult;
use crate::options::SelectOptionProjector;
use crate::query::TreeQuery;
use crate::traits::HierarchyNode;

/// Materializes flat records into a forest.
pub fn build_tree(
    records: &[FlatRecord],
    schema: &FieldSchema,
    config: &BuildConfig,
) -> TreeResult<Vec<TreeNode>> {
    TreeBuilder::with_config(schema, config.clone()).build(records)
}

/// Projects flat records into tree-select options.
pub fn build_select_options(
    records: &[FlatRecord],
    schema: &FieldSchema,
    root: Identifier,
) -> TreeResult<Vec<OptionNode>> {
    SelectOptionProjector::new(schema)
        .with_root(root)
        .project(records)
}

/// Ids from the topmost ancestor down to `id`.
pub fn find_parent_ids(
    records: &[FlatRecord],
    id: Identifier,
    schema: &FieldSchema,
) -> TreeResult<Vec<Identifier>> {
    AncestorResolver::new(schema).parent_ids(records, id)
}

/// Names from the topmost ancestor down to `id`.
pub fn find_parent_names(
    records: &[FlatRecord],
    id: Identifier,
    schema: &FieldSchema,
) -> TreeResult<Vec<String>> {
    AncestorResolver::new(schema).parent_names(records, id)
}

/// All transitive descendant ids of `parent_id`, pre-order.
pub fn find_descendants(
    records: &[FlatRecord],
    parent_id: Identifier,
    schema: &FieldSchema,
) -> TreeResult<Vec<Identifier>> {
    DescendantCollector::new(schema).collect(records, parent_id)
}

/// Leaf ids of a materialized forest, pre-order.
pub fn find_leaf_ids<N: HierarchyNode>(
    forest: &[N],
    schema: &FieldSchema,
    mode: LeafMode,
) -> TreeResult<Vec<Identifier>> {
    TreeQuery::new(schema).with_mode(mode).leaf_ids(forest)
}

/// The first node, pre-order, whose primary key is `target`.
pub fn find_node_by_id<'t, N: HierarchyNode>(
    forest: &'t [N],
    target: Identifier,
    schema: &FieldSchema,
) -> Option<&'t N> {
    TreeQuery::new(schema).find_node(forest, target)
}
