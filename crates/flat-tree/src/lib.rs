//! # flat-tree
//!
//! Turns flat parent-pointer records into trees, and queries the result.
//!
//! Every operation is parametric over a [`FieldSchema`], so the same code
//! serves `id`/`pid` rows, `node_id`/`parent_id` rows, or anything else.
//!
//! ## Key Features
//!
//! - **Tree building** - two-pass materialization with a lossy orphan policy
//! - **Select options** - label/value forests for tree-select widgets
//! - **Ancestor chains** - root-first id and name chains for a record
//! - **Descendants** - pre-order transitive descendant ids
//! - **Forest queries** - leaf collection and node lookup over typed or JSON
//!   forests
//! - **Cycle detection** - every walk fails with
//!   [`TreeError::CycleDetected`] instead of looping
//!
//! ## Quick Start
//!
//! ```rust
//! use flat_tree::{build_tree, find_descendants, find_parent_ids, BuildConfig};
//! use flat_tree_model::{FieldSchema, FlatRecord};
//! use serde_json::json;
//!
//! let records: Vec<FlatRecord> = serde_json::from_value(json!([
//!     {"id": 1, "pid": 0},
//!     {"id": 2, "pid": 1},
//!     {"id": 3, "pid": 1},
//!     {"id": 4, "pid": 2},
//! ])).unwrap();
//! let schema = FieldSchema::default();
//!
//! let forest = build_tree(&records, &schema, &BuildConfig::default()).unwrap();
//! assert_eq!(forest.len(), 1);
//!
//! assert_eq!(find_descendants(&records, 1, &schema).unwrap(), vec![2, 4, 3]);
//! assert_eq!(find_parent_ids(&records, 4, &schema).unwrap(), vec![1, 2, 4]);
//! ```
//!
//! ## Edge-case policy
//!
//! | Situation | Behavior |
//! |-----------|----------|
//! | Record without primary/foreign key | `SchemaViolation` (builder, projector) |
//! | Parent key matches no record | record dropped (orphan) |
//! | Duplicate primary key | every copy shares that key's child list |
//! | Unknown start id (ancestors) | empty result |
//! | Record without name (ancestors) | skipped in the name chain |
//! | Parent-pointer loop anywhere in the input | `CycleDetected` (builder, projector) |
//! | Malformed node (strict leaf mode) | skipped with its subtree |
//! | Children value that is not an array (leaf queries) | node skipped, never a leaf |
//!
//! ## Feature Flags
//!
//! - `parallel` - Builds independent root subtrees in parallel using rayon
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         flat-tree                            │
//! │                                                              │
//! │  flat records ──► TreeBuilder ──► TreeNode forest            │
//! │        │                              │                      │
//! │        ├──► SelectOptionProjector     └──► TreeQuery         │
//! │        ├──► AncestorResolver               (leaves, lookup)  │
//! │        └──► DescendantCollector                              │
//! │                                                              │
//! │  Dependencies:                                               │
//! │  └── flat-tree-model - FlatRecord, FieldSchema, TreeNode     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod ancestors;
mod api;
mod builder;
mod config;
mod descendants;
mod error;
mod keys;
mod options;
mod query;
mod traits;

// Public re-exports
pub use ancestors::{AncestorPath, AncestorResolver, ID_SEPARATOR, NAME_SEPARATOR};
pub use api::{
    build_select_options, build_tree, find_descendants, find_leaf_ids, find_node_by_id,
    find_parent_ids, find_parent_names,
};
pub use builder::TreeBuilder;
pub use config::{BuildConfig, BuildConfigBuilder, LeafMode};
pub use descendants::DescendantCollector;
pub use error::{TreeError, TreeResult};
pub use options::SelectOptionProjector;
pub use query::TreeQuery;
pub use traits::HierarchyNode;

// Re-export commonly used types from the model crate for convenience
pub use flat_tree_model::{
    FieldSchema, FlatRecord, Identifier, OptionNode, SchemaViolation, TreeNode,
};
