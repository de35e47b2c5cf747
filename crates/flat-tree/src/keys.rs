//! Up-front key validation and cycle tracking shared by the walkers.

use flat_tree_model::{FieldSchema, FlatRecord, Identifier, RecordExt};
use hashbrown::{HashMap, HashSet};

use crate::error::{TreeError, TreeResult};

/// A record whose primary and foreign keys have already been read.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KeyedRecord<'a> {
    /// Position in the caller's input.
    pub index: usize,
    /// Primary-key value.
    pub id: Identifier,
    /// Foreign-key value.
    pub parent: Identifier,
    /// The caller's record.
    pub record: &'a FlatRecord,
}

/// Reads both keys of every record, in input order.
///
/// Fails on the first record that lacks either key; the primary key is
/// checked before the foreign key.
pub(crate) fn key_records<'a>(
    records: &'a [FlatRecord],
    schema: &FieldSchema,
) -> TreeResult<Vec<KeyedRecord<'a>>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let id = record.require_identifier(&schema.primary_key, index)?;
            let parent = record.require_identifier(&schema.foreign_key, index)?;
            Ok(KeyedRecord {
                index,
                id,
                parent,
                record,
            })
        })
        .collect()
}

/// Fails if any primary key is reachable from itself through
/// parent-to-child edges, whether or not a root reaches it.
///
/// Keys are explored in input order, so the reported id is stable.
pub(crate) fn reject_cycles(keyed: &[KeyedRecord<'_>]) -> TreeResult<()> {
    let mut children: HashMap<Identifier, Vec<Identifier>> = HashMap::new();
    for entry in keyed {
        children.entry(entry.parent).or_default().push(entry.id);
    }

    let mut finished = HashSet::new();
    let mut path = ActivePath::default();
    for entry in keyed {
        visit(entry.id, &children, &mut finished, &mut path)?;
    }
    Ok(())
}

fn visit(
    id: Identifier,
    children: &HashMap<Identifier, Vec<Identifier>>,
    finished: &mut HashSet<Identifier>,
    path: &mut ActivePath,
) -> TreeResult<()> {
    if finished.contains(&id) {
        return Ok(());
    }

    path.enter(id)?;
    for &child in children.get(&id).into_iter().flatten() {
        visit(child, children, finished, path)?;
    }
    path.leave(id);
    finished.insert(id);
    Ok(())
}

/// Ids on the current root-to-node path of a depth-first walk.
#[derive(Debug, Default)]
pub(crate) struct ActivePath {
    ids: HashSet<Identifier>,
}

impl ActivePath {
    /// Pushes `id` onto the path, failing if it is already there.
    pub fn enter(&mut self, id: Identifier) -> TreeResult<()> {
        if self.ids.insert(id) {
            Ok(())
        } else {
            tracing::debug!(id, "cycle detected on active path");
            Err(TreeError::CycleDetected { id })
        }
    }

    /// Pops `id` off the path.
    pub fn leave(&mut self, id: Identifier) {
        self.ids.remove(&id);
    }
}
