//! # flat-tree-model
//!
//! Shared data model for turning flat parent-pointer records into trees.
//!
//! This crate provides:
//! - **[`FlatRecord`]**: an ordered field map, one per input row
//! - **[`FieldSchema`]**: which fields hold the primary key, the parent
//!   pointer, the children, labels, values and names
//! - **[`TreeNode`]** / **[`OptionNode`]**: materialized output shapes
//! - **[`SchemaViolation`]**: what goes wrong when a record lacks its keys
//!
//! The algorithms that build and query these shapes live in the `flat-tree`
//! crate.
//!
//! ## Usage
//!
//! ```rust
//! use flat_tree_model::{FieldSchema, FlatRecord, RecordExt};
//! use serde_json::json;
//!
//! let schema = FieldSchema::default();
//! let record: FlatRecord = serde_json::from_value(json!({"id": 2, "pid": "1"})).unwrap();
//!
//! assert_eq!(record.identifier(&schema.primary_key), Some(2));
//! // Numeric strings are accepted as identifiers.
//! assert_eq!(record.identifier(&schema.foreign_key), Some(1));
//! ```
//!
//! ## Identifiers
//!
//! | Value | Identifier |
//! |-------|------------|
//! | `7` | `7` |
//! | `"7"` | `7` |
//! | `1.5`, `"x"`, `[..]` | invalid |
//! | `null` / absent | missing |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod node;
mod record;
mod schema;

pub use error::{ModelResult, SchemaViolation};
pub use node::{forest_iter, forest_to_value, OptionNode, PreOrder, TreeNode};
pub use record::{
    display_text, identifier_from_value, is_root_sentinel, strict_identifier_from_value,
    FlatRecord, Identifier, RecordExt,
};
pub use schema::{
    FieldSchema, FieldSchemaBuilder, DEFAULT_CHILDREN_FIELD, DEFAULT_FOREIGN_KEY,
    DEFAULT_LABEL_FIELD, DEFAULT_NAME_FIELD, DEFAULT_PRIMARY_KEY, DEFAULT_VALUE_FIELD,
};
