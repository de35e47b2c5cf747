//! Downward descendant collection over flat records.

use flat_tree_model::{FieldSchema, FlatRecord, Identifier, RecordExt};
use hashbrown::HashMap;

use crate::error::TreeResult;
use crate::keys::ActivePath;

/// Collects every transitive descendant id of a parent, depth-first.
///
/// Order is pre-order with the dive interleaved: each child is emitted and
/// its whole subtree is emitted before the next sibling.
///
/// # Example
///
/// ```rust
/// use flat_tree::DescendantCollector;
/// use flat_tree_model::{FieldSchema, FlatRecord};
/// use serde_json::json;
///
/// let records: Vec<FlatRecord> = serde_json::from_value(json!([
///     {"id": 1, "pid": 0},
///     {"id": 2, "pid": 1},
///     {"id": 3, "pid": 1},
///     {"id": 4, "pid": 2},
/// ])).unwrap();
///
/// let schema = FieldSchema::default();
/// let ids = DescendantCollector::new(&schema).collect(&records, 1).unwrap();
/// assert_eq!(ids, vec![2, 4, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct DescendantCollector<'s> {
    schema: &'s FieldSchema,
}

impl<'s> DescendantCollector<'s> {
    /// Creates a collector for the given schema.
    pub fn new(schema: &'s FieldSchema) -> Self {
        Self { schema }
    }

    /// Returns all descendant ids of `parent_id`, excluding `parent_id`.
    ///
    /// Records without a foreign key never match any parent.
    ///
    /// # Errors
    ///
    /// - A schema violation for a record that names a parent but has no
    ///   usable primary key.
    /// - [`TreeError::CycleDetected`](crate::TreeError::CycleDetected) if a
    ///   descendant's id is already on the current path, `parent_id`
    ///   included.
    pub fn collect(&self, records: &[FlatRecord], parent_id: Identifier) -> TreeResult<Vec<Identifier>> {
        let by_parent = self.children_index(records)?;

        let mut result = Vec::new();
        let mut path = ActivePath::default();
        path.enter(parent_id)?;
        self.dive(&by_parent, parent_id, &mut path, &mut result)?;
        Ok(result)
    }

    /// Number of descendants of `parent_id`.
    pub fn count(&self, records: &[FlatRecord], parent_id: Identifier) -> TreeResult<usize> {
        Ok(self.collect(records, parent_id)?.len())
    }

    fn children_index(
        &self,
        records: &[FlatRecord],
    ) -> TreeResult<HashMap<Identifier, Vec<Identifier>>> {
        let mut by_parent: HashMap<Identifier, Vec<Identifier>> = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            let Some(parent) = record.identifier(&self.schema.foreign_key) else {
                continue;
            };
            let id = record.require_identifier(&self.schema.primary_key, index)?;
            by_parent.entry(parent).or_default().push(id);
        }
        Ok(by_parent)
    }

    fn dive(
        &self,
        by_parent: &HashMap<Identifier, Vec<Identifier>>,
        parent: Identifier,
        path: &mut ActivePath,
        result: &mut Vec<Identifier>,
    ) -> TreeResult<()> {
        let Some(children) = by_parent.get(&parent) else {
            return Ok(());
        };

        for &child in children {
            path.enter(child)?;
            result.push(child);
            self.dive(by_parent, child, path, result)?;
            path.leave(child);
        }
        Ok(())
    }
}
