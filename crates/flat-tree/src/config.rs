//! Configuration types for tree construction and queries.

use flat_tree_model::Identifier;
use serde::{Deserialize, Serialize};

/// Configuration for the tree builder.
///
/// # Example
///
/// ```rust
/// use flat_tree::BuildConfig;
///
/// let config = BuildConfig::builder()
///     .with_root(10)
///     .with_always_emit_children(false)
///     .with_parallel(true)
///     .build();
///
/// assert_eq!(config.root, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Foreign-key value that marks a record as top-level.
    pub root: Identifier,
    /// Attach an explicit empty children field to leaves.
    pub always_emit_children: bool,
    /// Build independent root subtrees in parallel (requires `parallel` feature).
    pub parallel: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: 0,
            always_emit_children: true,
            parallel: false,
        }
    }
}

impl BuildConfig {
    /// Creates a new builder for BuildConfig.
    pub fn builder() -> BuildConfigBuilder {
        BuildConfigBuilder::default()
    }
}

/// Builder for BuildConfig.
#[derive(Debug, Clone, Default)]
pub struct BuildConfigBuilder {
    config: BuildConfig,
}

impl BuildConfigBuilder {
    /// Sets the root foreign-key value.
    pub fn with_root(mut self, root: Identifier) -> Self {
        self.config.root = root;
        self
    }

    /// Enables or disables explicit empty children on leaves.
    pub fn with_always_emit_children(mut self, always: bool) -> Self {
        self.config.always_emit_children = always;
        self
    }

    /// Enables or disables parallel construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Builds the BuildConfig.
    pub fn build(self) -> BuildConfig {
        self.config
    }
}

/// How leaf collection treats nodes that are not well-formed records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafMode {
    /// Skip nodes that are not records or whose key is not a JSON integer.
    Strict,
    /// Visit every node; a leaf without a readable key is an error.
    #[default]
    Lenient,
}
