//! Label/value projections for tree-select widgets.

use flat_tree_model::{FieldSchema, FlatRecord, Identifier, OptionNode, RecordExt};
use hashbrown::HashMap;
use serde_json::Value;

use crate::error::TreeResult;
use crate::keys::{key_records, reject_cycles, KeyedRecord};

/// Projects flat records straight into a forest of [`OptionNode`]s.
///
/// Works directly on the flat records; no intermediate [`TreeNode`]
/// forest is built. A record's children are every record whose foreign key
/// equals its primary key, in input order, so records whose parent never
/// appears are simply never reached.
///
/// [`TreeNode`]: flat_tree_model::TreeNode
///
/// # Example
///
/// ```rust
/// use flat_tree::SelectOptionProjector;
/// use flat_tree_model::{FieldSchema, FlatRecord};
/// use serde_json::json;
///
/// let records: Vec<FlatRecord> = serde_json::from_value(json!([
///     {"id": 1, "pid": 0, "label": "Fruit", "value": "fruit"},
///     {"id": 2, "pid": 1, "label": "Apple", "value": "apple"},
/// ])).unwrap();
///
/// let schema = FieldSchema::default();
/// let options = SelectOptionProjector::new(&schema).project(&records).unwrap();
///
/// assert_eq!(
///     serde_json::to_value(&options).unwrap(),
///     json!([{"label": "Fruit", "value": "fruit", "children": [
///         {"label": "Apple", "value": "apple"}
///     ]}])
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SelectOptionProjector<'s> {
    schema: &'s FieldSchema,
    root: Identifier,
}

impl<'s> SelectOptionProjector<'s> {
    /// Creates a projector rooted at foreign key `0`.
    pub fn new(schema: &'s FieldSchema) -> Self {
        Self { schema, root: 0 }
    }

    /// Sets the foreign-key value that marks top-level records.
    pub fn with_root(mut self, root: Identifier) -> Self {
        self.root = root;
        self
    }

    /// Projects `records` into options.
    ///
    /// Missing label or value fields project as `null`.
    ///
    /// # Errors
    ///
    /// Fails with a schema violation for the first record without usable
    /// keys, and with a cycle error if any record is reachable from itself,
    /// whether or not the root reaches it.
    pub fn project(&self, records: &[FlatRecord]) -> TreeResult<Vec<OptionNode>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let keyed = key_records(records, self.schema)?;
        reject_cycles(&keyed)?;

        let mut by_parent: HashMap<Identifier, Vec<usize>> = HashMap::new();
        for (pos, entry) in keyed.iter().enumerate() {
            by_parent.entry(entry.parent).or_default().push(pos);
        }

        let options = self.level(&keyed, &by_parent, self.root);
        tracing::debug!(
            records = records.len(),
            top_level = options.len(),
            "projected select options"
        );
        Ok(options)
    }

    fn level(
        &self,
        keyed: &[KeyedRecord<'_>],
        by_parent: &HashMap<Identifier, Vec<usize>>,
        parent: Identifier,
    ) -> Vec<OptionNode> {
        let Some(members) = by_parent.get(&parent) else {
            return Vec::new();
        };

        members
            .iter()
            .map(|&pos| {
                let entry = &keyed[pos];
                OptionNode {
                    label: self.field(entry.record, &self.schema.label_field),
                    value: self.field(entry.record, &self.schema.value_field),
                    children: self.level(keyed, by_parent, entry.id),
                }
            })
            .collect()
    }

    fn field(&self, record: &FlatRecord, name: &str) -> Value {
        record.present(name).cloned().unwrap_or(Value::Null)
    }
}
