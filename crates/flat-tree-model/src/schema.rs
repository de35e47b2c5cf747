//! Field-name configuration shared by every hierarchy operation.

use serde::{Deserialize, Serialize};

/// Default primary-key field name.
pub const DEFAULT_PRIMARY_KEY: &str = "id";
/// Default foreign-key (parent pointer) field name.
pub const DEFAULT_FOREIGN_KEY: &str = "pid";
/// Default field under which children are attached.
pub const DEFAULT_CHILDREN_FIELD: &str = "children";
/// Default label field for select options.
pub const DEFAULT_LABEL_FIELD: &str = "label";
/// Default value field for select options.
pub const DEFAULT_VALUE_FIELD: &str = "value";
/// Default display-name field for ancestor name chains.
pub const DEFAULT_NAME_FIELD: &str = "name";

/// Names the record fields that play each hierarchy role.
///
/// No algorithm hard-codes a field name; everything is read through the
/// schema. Missing entries fall back to the defaults when deserialized.
///
/// # Example
///
/// ```rust
/// use flat_tree_model::FieldSchema;
///
/// let schema = FieldSchema::builder()
///     .with_primary_key("node_id")
///     .with_foreign_key("parent_id")
///     .with_children_field("sub_nodes")
///     .build();
///
/// assert_eq!(schema.primary_key, "node_id");
/// assert_eq!(schema.label_field, "label");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSchema {
    /// Field holding the record's own identifier.
    pub primary_key: String,
    /// Field holding the parent's identifier.
    pub foreign_key: String,
    /// Field under which materialized children are attached.
    pub children_field: String,
    /// Field copied into an option's `label`.
    pub label_field: String,
    /// Field copied into an option's `value`.
    pub value_field: String,
    /// Field used for ancestor name chains.
    pub name_field: String,
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self {
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            foreign_key: DEFAULT_FOREIGN_KEY.to_string(),
            children_field: DEFAULT_CHILDREN_FIELD.to_string(),
            label_field: DEFAULT_LABEL_FIELD.to_string(),
            value_field: DEFAULT_VALUE_FIELD.to_string(),
            name_field: DEFAULT_NAME_FIELD.to_string(),
        }
    }
}

impl FieldSchema {
    /// Creates a new builder starting from the default field names.
    pub fn builder() -> FieldSchemaBuilder {
        FieldSchemaBuilder::default()
    }
}

/// Builder for FieldSchema.
#[derive(Debug, Clone, Default)]
pub struct FieldSchemaBuilder {
    schema: FieldSchema,
}

impl FieldSchemaBuilder {
    /// Sets the primary-key field name.
    pub fn with_primary_key(mut self, field: impl Into<String>) -> Self {
        self.schema.primary_key = field.into();
        self
    }

    /// Sets the foreign-key field name.
    pub fn with_foreign_key(mut self, field: impl Into<String>) -> Self {
        self.schema.foreign_key = field.into();
        self
    }

    /// Sets the children field name.
    pub fn with_children_field(mut self, field: impl Into<String>) -> Self {
        self.schema.children_field = field.into();
        self
    }

    /// Sets the label field name.
    pub fn with_label_field(mut self, field: impl Into<String>) -> Self {
        self.schema.label_field = field.into();
        self
    }

    /// Sets the value field name.
    pub fn with_value_field(mut self, field: impl Into<String>) -> Self {
        self.schema.value_field = field.into();
        self
    }

    /// Sets the name field.
    pub fn with_name_field(mut self, field: impl Into<String>) -> Self {
        self.schema.name_field = field.into();
        self
    }

    /// Builds the FieldSchema.
    pub fn build(self) -> FieldSchema {
        self.schema
    }
}
