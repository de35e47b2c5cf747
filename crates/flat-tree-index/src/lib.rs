//! # flat-tree-index
//!
//! Precomputed lookups for callers that ask many ancestor and descendant
//! questions about one record set.
//!
//! The `flat-tree` walkers rebuild their lookup tables on every call. This
//! crate builds them once into a [`HierarchyIndex`] and answers the same
//! queries with the same results.
//!
//! ## Features
//!
//! - **`cache`**: [`DescendantCache`], an LRU of descendant lists shared
//!   across threads
//!
//! ## Quick Start
//!
//! ```rust
//! use flat_tree::find_descendants;
//! use flat_tree_index::HierarchyIndex;
//! use flat_tree_model::{FieldSchema, FlatRecord};
//! use serde_json::json;
//!
//! let records: Vec<FlatRecord> = serde_json::from_value(json!([
//!     {"id": 1, "pid": 0},
//!     {"id": 2, "pid": 1},
//!     {"id": 3, "pid": 2},
//! ])).unwrap();
//! let schema = FieldSchema::default();
//!
//! let index = HierarchyIndex::build(&records, &schema).unwrap();
//! assert_eq!(
//!     index.descendant_ids(1).unwrap(),
//!     find_descendants(&records, 1, &schema).unwrap()
//! );
//! ```

#![warn(missing_docs)]

mod error;
mod index;
mod stats;

#[cfg(feature = "cache")]
mod cache;

pub use error::{IndexError, IndexResult};
pub use index::HierarchyIndex;
pub use stats::IndexStats;

#[cfg(feature = "cache")]
pub use cache::{CacheConfig, CacheStats, DescendantCache};

// Re-export from flat-tree for convenience
pub use flat_tree::AncestorPath;
pub use flat_tree_model::Identifier;
