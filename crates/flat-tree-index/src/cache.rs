//! LRU cache of descendant lists over a [`HierarchyIndex`].
//!
//! Descendant lists of wide or deep nodes are the expensive query; the cache
//! keeps the most recently used ones behind a `parking_lot::Mutex` and hands
//! them out as shared `Arc`s.

use std::num::NonZeroUsize;
use std::sync::Arc;

use flat_tree_model::Identifier;
use lru::LruCache;
use parking_lot::Mutex;

use crate::error::{IndexError, IndexResult};
use crate::index::HierarchyIndex;

/// Configuration for the descendant cache.
///
/// # Example
///
/// ```rust
/// use flat_tree_index::CacheConfig;
///
/// let config = CacheConfig::default().with_max_entries(256);
/// assert_eq!(config.max_entries, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of cached descendant lists. Zero is treated as one.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 1_024 }
    }
}

impl CacheConfig {
    /// Sets the maximum number of cached lists.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }
}

/// Hit and miss counters for a [`DescendantCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that walked the index.
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe LRU cache of [`HierarchyIndex::descendant_ids`] results.
///
/// # Example
///
/// ```rust
/// use flat_tree_index::{CacheConfig, DescendantCache, HierarchyIndex};
/// use flat_tree_model::{FieldSchema, FlatRecord};
/// use serde_json::json;
///
/// let records: Vec<FlatRecord> = serde_json::from_value(json!([
///     {"id": 1, "pid": 0},
///     {"id": 2, "pid": 1},
/// ])).unwrap();
/// let index = HierarchyIndex::build(&records, &FieldSchema::default()).unwrap();
/// let cache = DescendantCache::new(&index, CacheConfig::default());
///
/// assert_eq!(*cache.get(1).unwrap(), vec![2]);
/// assert_eq!(*cache.get(1).unwrap(), vec![2]);
/// assert_eq!(cache.stats().hits, 1);
/// ```
pub struct DescendantCache<'i> {
    index: &'i HierarchyIndex,
    inner: Mutex<LruCache<Identifier, Arc<Vec<Identifier>>>>,
    stats: Mutex<CacheStats>,
}

impl<'i> DescendantCache<'i> {
    /// Creates an empty cache over `index`.
    pub fn new(index: &'i HierarchyIndex, config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            index,
            inner: Mutex::new(LruCache::new(capacity)),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    /// The index this cache reads from.
    pub fn index(&self) -> &'i HierarchyIndex {
        self.index
    }

    /// Descendants of `parent_id`, from the cache when possible.
    ///
    /// # Errors
    ///
    /// - [`IndexError::UnknownId`] if `parent_id` is neither a key nor a
    ///   parent reference in the index.
    /// - A cycle error from the underlying walk. Failed walks are not cached.
    pub fn get(&self, parent_id: Identifier) -> IndexResult<Arc<Vec<Identifier>>> {
        if !self.index.is_known(parent_id) {
            return Err(IndexError::UnknownId(parent_id));
        }

        let cached = self.inner.lock().get(&parent_id).cloned();
        if let Some(hit) = cached {
            self.stats.lock().hits += 1;
            return Ok(hit);
        }

        let computed = Arc::new(self.index.descendant_ids(parent_id)?);
        self.inner.lock().put(parent_id, Arc::clone(&computed));
        self.stats.lock().misses += 1;
        tracing::trace!(parent_id, len = computed.len(), "cached descendant list");
        Ok(computed)
    }

    /// Precomputes the lists for `ids`.
    ///
    /// Stops at the first id that fails.
    pub fn warm(&self, ids: &[Identifier]) -> IndexResult<()> {
        for &id in ids {
            self.get(id)?;
        }
        Ok(())
    }

    /// Returns true if a list for `parent_id` is cached, without touching
    /// LRU order.
    pub fn contains(&self, parent_id: Identifier) -> bool {
        self.inner.lock().contains(&parent_id)
    }

    /// Number of cached lists.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached list. Counters are kept.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Returns a snapshot of the hit and miss counters.
    pub fn stats(&self) -> CacheStats {
        *self.stats.lock()
    }
}

impl std::fmt::Debug for DescendantCache<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescendantCache")
            .field("entries", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}
