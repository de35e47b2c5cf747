//! Precomputed parent/child adjacency over flat records.
//!
//! The flat walkers in `flat-tree` rescan or re-index their input on every
//! call. A [`HierarchyIndex`] does that work once so repeated ancestor and
//! descendant queries against the same record set are map lookups.
//!
//! # Example
//!
//! ```rust
//! use flat_tree_index::HierarchyIndex;
//! use flat_tree_model::{FieldSchema, FlatRecord};
//! use serde_json::json;
//!
//! let records: Vec<FlatRecord> = serde_json::from_value(json!([
//!     {"id": 1, "pid": 0, "name": "A"},
//!     {"id": 2, "pid": 1, "name": "B"},
//!     {"id": 3, "pid": 1, "name": "C"},
//!     {"id": 4, "pid": 2, "name": "D"},
//! ])).unwrap();
//!
//! let index = HierarchyIndex::build(&records, &FieldSchema::default()).unwrap();
//!
//! assert_eq!(index.descendant_ids(1).unwrap(), vec![2, 4, 3]);
//! assert_eq!(index.ancestor_ids(4).unwrap(), vec![1, 2, 4]);
//! assert_eq!(index.resolve(4).unwrap().joined_names(), "A-B-D");
//! ```

use std::time::Instant;

use flat_tree::{AncestorPath, TreeError};
use flat_tree_model::{
    display_text, is_root_sentinel, FieldSchema, FlatRecord, Identifier, RecordExt,
};
use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};

use crate::error::IndexResult;
use crate::stats::IndexStats;

/// What the index remembers about the first record carrying a key.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexEntry {
    parent: Option<Identifier>,
    name: Option<String>,
}

/// Parent pointers, child lists and display names keyed by identifier.
///
/// For records with unique primary keys, every query returns exactly what
/// the matching `flat-tree` operation returns on the same records:
///
/// | Index | Flat operation |
/// |-------|----------------|
/// | [`ancestor_ids`](Self::ancestor_ids) | `find_parent_ids` |
/// | [`ancestor_names`](Self::ancestor_names) | `find_parent_names` |
/// | [`descendant_ids`](Self::descendant_ids) | `find_descendants` |
///
/// With duplicate keys the index still agrees: upward lookups use the first
/// record carrying a key, and child lists hold every record in input order.
#[derive(Debug, Clone)]
pub struct HierarchyIndex {
    /// First record per primary key.
    entries: HashMap<Identifier, IndexEntry>,
    /// Child ids per parent reference, in input order.
    children: HashMap<Identifier, Vec<Identifier>>,
    stats: IndexStats,
}

impl HierarchyIndex {
    /// Indexes `records` under `schema`.
    ///
    /// Records without a foreign key are indexed without a parent.
    ///
    /// # Errors
    ///
    /// [`IndexError::Schema`](crate::IndexError::Schema) if any record lacks
    /// a usable primary key.
    pub fn build(records: &[FlatRecord], schema: &FieldSchema) -> IndexResult<Self> {
        let start = Instant::now();
        let mut entries: HashMap<Identifier, IndexEntry> = HashMap::with_capacity(records.len());
        let mut children: HashMap<Identifier, Vec<Identifier>> = HashMap::new();
        let mut stats = IndexStats {
            record_count: records.len(),
            ..Default::default()
        };

        for (index, record) in records.iter().enumerate() {
            let id = record.require_identifier(&schema.primary_key, index)?;
            let parent = record.identifier(&schema.foreign_key);

            if let Some(parent) = parent {
                children.entry(parent).or_default().push(id);
                stats.edge_count += 1;
                if is_root_sentinel(parent) {
                    stats.root_count += 1;
                }
            }

            match entries.entry(id) {
                Entry::Occupied(_) => stats.duplicate_count += 1,
                Entry::Vacant(slot) => {
                    slot.insert(IndexEntry {
                        parent,
                        name: record.present(&schema.name_field).and_then(display_text),
                    });
                }
            }
        }

        stats.node_count = entries.len();
        stats.parent_count = children.len();
        stats.build_time_us = start.elapsed().as_micros() as u64;
        tracing::debug!(
            records = stats.record_count,
            nodes = stats.node_count,
            duplicates = stats.duplicate_count,
            "built hierarchy index"
        );

        Ok(Self {
            entries,
            children,
            stats,
        })
    }

    /// Returns build statistics.
    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Number of distinct primary keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no records were indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if some record carries `id` as its primary key.
    pub fn contains(&self, id: Identifier) -> bool {
        self.entries.contains_key(&id)
    }

    /// Returns true if `id` is a primary key or some record's parent.
    pub fn is_known(&self, id: Identifier) -> bool {
        self.contains(id) || self.children.contains_key(&id)
    }

    /// The parent of the first record carrying `id`.
    pub fn parent(&self, id: Identifier) -> Option<Identifier> {
        self.entries.get(&id).and_then(|entry| entry.parent)
    }

    /// Direct children of `id`, in input order.
    pub fn children(&self, id: Identifier) -> &[Identifier] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolves the ancestor chain of `id`, root first.
    ///
    /// An unknown `id` gives an empty path.
    ///
    /// # Errors
    ///
    /// A cycle error if the chain reaches an id twice.
    pub fn resolve(&self, id: Identifier) -> IndexResult<AncestorPath> {
        let mut path = AncestorPath::default();
        let mut visited = HashSet::new();
        let mut current = Some(id);

        while let Some(cur) = current.filter(|&c| !is_root_sentinel(c)) {
            let Some(entry) = self.entries.get(&cur) else {
                break;
            };
            if !visited.insert(cur) {
                tracing::debug!(id = cur, start = id, "cycle in indexed parent chain");
                return Err(TreeError::CycleDetected { id: cur }.into());
            }

            path.ids.push(cur);
            if let Some(name) = &entry.name {
                path.names.push(name.clone());
            }
            current = entry.parent;
        }

        path.ids.reverse();
        path.names.reverse();
        Ok(path)
    }

    /// Ids from the topmost ancestor down to `id`.
    pub fn ancestor_ids(&self, id: Identifier) -> IndexResult<Vec<Identifier>> {
        Ok(self.resolve(id)?.ids)
    }

    /// Names from the topmost ancestor down to `id`.
    pub fn ancestor_names(&self, id: Identifier) -> IndexResult<Vec<String>> {
        Ok(self.resolve(id)?.names)
    }

    /// Returns true if `ancestor` is on the parent chain of `id`.
    ///
    /// A record is not its own ancestor.
    pub fn is_ancestor_of(&self, ancestor: Identifier, id: Identifier) -> IndexResult<bool> {
        let ids = self.ancestor_ids(id)?;
        Ok(ids
            .split_last()
            .is_some_and(|(_, above)| above.contains(&ancestor)))
    }

    /// All transitive descendants of `parent_id`, pre-order.
    ///
    /// # Errors
    ///
    /// A cycle error if a descendant is already on the current path,
    /// `parent_id` included.
    pub fn descendant_ids(&self, parent_id: Identifier) -> IndexResult<Vec<Identifier>> {
        let mut result = Vec::new();
        let mut path = HashSet::new();
        path.insert(parent_id);
        self.dive(parent_id, &mut path, &mut result)?;
        Ok(result)
    }

    fn dive(
        &self,
        parent: Identifier,
        path: &mut HashSet<Identifier>,
        result: &mut Vec<Identifier>,
    ) -> Result<(), TreeError> {
        for &child in self.children(parent) {
            if !path.insert(child) {
                tracing::debug!(id = child, parent, "cycle below indexed parent");
                return Err(TreeError::CycleDetected { id: child });
            }
            result.push(child);
            self.dive(child, path, result)?;
            path.remove(&child);
        }
        Ok(())
    }
}
