//! Upward parent-chain resolution over flat records.

use flat_tree_model::{
    display_text, is_root_sentinel, FieldSchema, FlatRecord, Identifier, RecordExt,
};
use hashbrown::HashSet;

use crate::error::{TreeError, TreeResult};

/// Separator used by [`AncestorPath::joined_ids`].
pub const ID_SEPARATOR: &str = ",";
/// Separator used by [`AncestorPath::joined_names`].
pub const NAME_SEPARATOR: &str = "-";

/// The chain from the topmost ancestor down to the requested record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorPath {
    /// Identifiers, root first, ending with the requested id.
    pub ids: Vec<Identifier>,
    /// Names of the visited records that carry one, root first.
    pub names: Vec<String>,
}

impl AncestorPath {
    /// Returns true if the start id was not found.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of records on the chain.
    pub fn depth(&self) -> usize {
        self.ids.len()
    }

    /// Ids joined with `,`, e.g. `"1,2,3"`.
    pub fn joined_ids(&self) -> String {
        self.ids
            .iter()
            .map(Identifier::to_string)
            .collect::<Vec<_>>()
            .join(ID_SEPARATOR)
    }

    /// Names joined with `-`, e.g. `"A-B-C"`.
    pub fn joined_names(&self) -> String {
        self.names.join(NAME_SEPARATOR)
    }
}

/// Walks parent pointers from a record up to the root.
///
/// The walk stops at a non-positive id, at an id that no record carries, or
/// when a record has no usable foreign key. Lookups scan the records in
/// order and take the first match, so no index is built.
///
/// # Example
///
/// ```rust
/// use flat_tree::AncestorResolver;
/// use flat_tree_model::{FieldSchema, FlatRecord};
/// use serde_json::json;
///
/// let records: Vec<FlatRecord> = serde_json::from_value(json!([
///     {"id": 1, "pid": 0, "name": "A"},
///     {"id": 2, "pid": 1, "name": "B"},
///     {"id": 3, "pid": 2, "name": "C"},
/// ])).unwrap();
///
/// let schema = FieldSchema::default();
/// let path = AncestorResolver::new(&schema).resolve(&records, 3).unwrap();
///
/// assert_eq!(path.ids, vec![1, 2, 3]);
/// assert_eq!(path.joined_names(), "A-B-C");
/// ```
#[derive(Debug, Clone)]
pub struct AncestorResolver<'s> {
    schema: &'s FieldSchema,
}

impl<'s> AncestorResolver<'s> {
    /// Creates a resolver for the given schema.
    pub fn new(schema: &'s FieldSchema) -> Self {
        Self { schema }
    }

    /// Resolves ids and names in one walk.
    ///
    /// An unknown `id` gives an empty path.
    ///
    /// # Errors
    ///
    /// [`TreeError::CycleDetected`] if the walk reaches an id twice.
    pub fn resolve(&self, records: &[FlatRecord], id: Identifier) -> TreeResult<AncestorPath> {
        let mut path = AncestorPath::default();
        let mut visited = HashSet::new();
        let mut current = Some(id);

        while let Some(cur) = current.filter(|&c| !is_root_sentinel(c)) {
            let Some(record) = self.lookup(records, cur) else {
                break;
            };
            if !visited.insert(cur) {
                tracing::debug!(id = cur, start = id, "cycle in parent chain");
                return Err(TreeError::CycleDetected { id: cur });
            }

            path.ids.push(cur);
            if let Some(name) = record
                .present(&self.schema.name_field)
                .and_then(display_text)
            {
                path.names.push(name);
            }
            current = record.identifier(&self.schema.foreign_key);
        }

        path.ids.reverse();
        path.names.reverse();
        Ok(path)
    }

    /// Ids from the topmost ancestor down to `id`.
    pub fn parent_ids(&self, records: &[FlatRecord], id: Identifier) -> TreeResult<Vec<Identifier>> {
        Ok(self.resolve(records, id)?.ids)
    }

    /// Names from the topmost ancestor down to `id`.
    ///
    /// Records without a name contribute nothing.
    pub fn parent_names(&self, records: &[FlatRecord], id: Identifier) -> TreeResult<Vec<String>> {
        Ok(self.resolve(records, id)?.names)
    }

    fn lookup<'r>(&self, records: &'r [FlatRecord], id: Identifier) -> Option<&'r FlatRecord> {
        records
            .iter()
            .find(|record| record.identifier(&self.schema.primary_key) == Some(id))
    }
}
