//! Flat-record to forest materialization.
//!
//! Records are partitioned into roots (foreign key equals the configured
//! root) and everything else; every other record is attached under the
//! primary key its foreign key names. Records whose parent key appears
//! nowhere in the input are orphans and are dropped from the forest.
//!
//! A loop of parent pointers anywhere in the input fails the whole build,
//! including loops no root reaches.

use flat_tree_model::{FieldSchema, FlatRecord, Identifier, TreeNode};
use hashbrown::{HashMap, HashSet};

use crate::config::BuildConfig;
use crate::error::TreeResult;
use crate::keys::{key_records, reject_cycles, KeyedRecord};

/// Builds forests out of flat parent-pointer records.
///
/// # Example
///
/// ```rust
/// use flat_tree::{BuildConfig, TreeBuilder};
/// use flat_tree_model::{FieldSchema, FlatRecord};
/// use serde_json::json;
///
/// let records: Vec<FlatRecord> = serde_json::from_value(json!([
///     {"id": 1, "pid": 0},
///     {"id": 2, "pid": 1},
/// ])).unwrap();
///
/// let schema = FieldSchema::default();
/// let forest = TreeBuilder::new(&schema).build(&records).unwrap();
///
/// assert_eq!(forest.len(), 1);
/// assert_eq!(forest[0].children().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TreeBuilder<'s> {
    schema: &'s FieldSchema,
    config: BuildConfig,
}

/// Roots and parent-keyed child lists for one build.
struct ForestLayout {
    /// Positions (into the keyed records) of top-level records.
    roots: Vec<usize>,
    /// Parent primary key to child positions, in input order.
    children: HashMap<Identifier, Vec<usize>>,
}

impl ForestLayout {
    fn partition(keyed: &[KeyedRecord<'_>], root: Identifier) -> Self {
        // Records sharing a primary key share its child list.
        let known: HashSet<Identifier> = keyed.iter().map(|entry| entry.id).collect();

        let mut roots = Vec::new();
        let mut children: HashMap<Identifier, Vec<usize>> = HashMap::new();
        let mut orphans = 0usize;

        for (pos, entry) in keyed.iter().enumerate() {
            if entry.parent == root {
                roots.push(pos);
            } else if known.contains(&entry.parent) {
                children.entry(entry.parent).or_default().push(pos);
            } else {
                orphans += 1;
                tracing::trace!(
                    index = entry.index,
                    id = entry.id,
                    parent = entry.parent,
                    "dropping orphan record"
                );
            }
        }

        tracing::debug!(
            records = keyed.len(),
            roots = roots.len(),
            orphans,
            "partitioned flat records"
        );

        Self { roots, children }
    }
}

impl<'s> TreeBuilder<'s> {
    /// Creates a builder with the default configuration.
    pub fn new(schema: &'s FieldSchema) -> Self {
        Self::with_config(schema, BuildConfig::default())
    }

    /// Creates a builder with a custom configuration.
    pub fn with_config(schema: &'s FieldSchema, config: BuildConfig) -> Self {
        Self { schema, config }
    }

    /// Returns the builder's configuration.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Materializes `records` into a forest.
    ///
    /// # Errors
    ///
    /// - [`TreeError::SchemaViolation`](crate::TreeError::SchemaViolation) for
    ///   the first record (in input order) without a usable primary or
    ///   foreign key.
    /// - [`TreeError::CycleDetected`](crate::TreeError::CycleDetected) when a
    ///   record is reachable from itself through foreign-key edges, even if
    ///   no root reaches the loop.
    pub fn build(&self, records: &[FlatRecord]) -> TreeResult<Vec<TreeNode>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let keyed = key_records(records, self.schema)?;
        reject_cycles(&keyed)?;
        let layout = ForestLayout::partition(&keyed, self.config.root);
        Ok(self.materialize_roots(&keyed, &layout))
    }

    #[cfg(feature = "parallel")]
    fn materialize_roots(&self, keyed: &[KeyedRecord<'_>], layout: &ForestLayout) -> Vec<TreeNode> {
        use rayon::prelude::*;

        if !self.config.parallel {
            return self.materialize_sequential(keyed, layout);
        }

        layout
            .roots
            .par_iter()
            .map(|&pos| self.materialize(keyed, layout, pos))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn materialize_roots(&self, keyed: &[KeyedRecord<'_>], layout: &ForestLayout) -> Vec<TreeNode> {
        self.materialize_sequential(keyed, layout)
    }

    fn materialize_sequential(
        &self,
        keyed: &[KeyedRecord<'_>],
        layout: &ForestLayout,
    ) -> Vec<TreeNode> {
        layout
            .roots
            .iter()
            .map(|&pos| self.materialize(keyed, layout, pos))
            .collect()
    }

    // Input is acyclic by now, so recursion terminates.
    fn materialize(&self, keyed: &[KeyedRecord<'_>], layout: &ForestLayout, pos: usize) -> TreeNode {
        let entry = &keyed[pos];

        let children: Vec<TreeNode> = layout
            .children
            .get(&entry.id)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&child| self.materialize(keyed, layout, child))
                    .collect()
            })
            .unwrap_or_default();

        let mut record = entry.record.clone();
        record.shift_remove(&self.schema.children_field);

        let children = if !children.is_empty() || self.config.always_emit_children {
            Some(children)
        } else {
            None
        };

        TreeNode { record, children }
    }
}
