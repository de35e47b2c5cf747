//! Statistics about index builds.

use std::fmt;

/// Statistics about a [`HierarchyIndex`](crate::HierarchyIndex).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexStats {
    /// Number of input records.
    pub record_count: usize,
    /// Number of distinct primary keys.
    pub node_count: usize,
    /// Number of records that name a parent.
    pub edge_count: usize,
    /// Number of distinct parent references, root sentinels included.
    pub parent_count: usize,
    /// Number of records whose parent is a root sentinel.
    pub root_count: usize,
    /// Number of records whose primary key was already taken.
    pub duplicate_count: usize,
    /// Time taken to build the index in microseconds.
    pub build_time_us: u64,
}

impl IndexStats {
    /// Average number of children per parent reference.
    pub fn avg_fan_out(&self) -> f64 {
        if self.parent_count == 0 {
            0.0
        } else {
            self.edge_count as f64 / self.parent_count as f64
        }
    }
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hierarchy Index Statistics:")?;
        writeln!(f, "  Records:    {}", self.record_count)?;
        writeln!(f, "  Nodes:      {}", self.node_count)?;
        writeln!(f, "  Edges:      {}", self.edge_count)?;
        writeln!(f, "  Parents:    {}", self.parent_count)?;
        writeln!(f, "  Fan-out:    {:.2}", self.avg_fan_out())?;
        writeln!(f, "  Roots:      {}", self.root_count)?;
        writeln!(f, "  Duplicates: {}", self.duplicate_count)?;
        writeln!(f, "  Build time: {}us", self.build_time_us)?;
        Ok(())
    }
}
