//! Schema registry for document field declarations.

use std::collections::HashMap;

use crate::error::{Result, SedgeError};
use crate::schema::field::{FieldDescriptor, FieldInfo, Multiplicity};

/// A schema registers the fields available to query building.
///
/// Schemas are plain values explicitly constructed and passed by the caller;
/// there is no ambient global registry, so isolated test schemas can live
/// side by side. Descriptor handles stay with the caller (they are the only
/// way to build filters); the schema stores metadata snapshots and enforces
/// name uniqueness.
///
/// # Examples
///
/// ```
/// use sedge::schema::{MultiTextField, NumericField, Schema};
///
/// let price = NumericField::new("price").unwrap();
/// let tags = MultiTextField::new("tags").unwrap();
///
/// let mut schema = Schema::new();
/// schema.register(&price).unwrap();
/// schema.register(&tags).unwrap();
///
/// assert!(schema.has_field("price"));
/// let filter = price.between(10, 20).and(tags.equals("sale"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Map of field names to their metadata
    fields: HashMap<String, FieldInfo>,
    /// Ordered list of field names (for consistent ordering)
    field_names: Vec<String>,
}

impl Schema {
    /// Create a new empty schema.
    pub fn new() -> Self {
        Schema {
            fields: HashMap::new(),
            field_names: Vec::new(),
        }
    }

    /// Register a field descriptor.
    ///
    /// Fails if a field with the same name is already registered.
    pub fn register<D: FieldDescriptor>(&mut self, descriptor: &D) -> Result<()> {
        let info = descriptor.info();

        if self.fields.contains_key(info.name()) {
            return Err(SedgeError::schema(format!(
                "field '{}' already exists",
                info.name()
            )));
        }

        self.field_names.push(info.name().to_string());
        self.fields.insert(info.name().to_string(), info.clone());

        Ok(())
    }

    /// Get a field's metadata by name.
    pub fn descriptor(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.get(name)
    }

    /// Check if a field exists.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get all field names in registration order.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the names of all fields usable for sorting.
    pub fn sortable_fields(&self) -> Vec<&str> {
        self.field_names
            .iter()
            .filter(|name| {
                self.fields
                    .get(name.as_str())
                    .is_some_and(|info| info.is_sortable())
            })
            .map(|name| name.as_str())
            .collect()
    }

    /// Get the names of all multi-valued fields.
    pub fn multi_valued_fields(&self) -> Vec<&str> {
        self.field_names
            .iter()
            .filter(|name| {
                self.fields
                    .get(name.as_str())
                    .is_some_and(|info| info.multiplicity() == Multiplicity::Multi)
            })
            .map(|name| name.as_str())
            .collect()
    }

    /// Validate that the schema is usable.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(SedgeError::schema("schema must have at least one field"));
        }
        Ok(())
    }

    /// Create a builder for constructing schemas.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }
}

/// A builder for constructing schemas in a fluent manner.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Create a new schema builder.
    pub fn new() -> Self {
        SchemaBuilder {
            schema: Schema::new(),
        }
    }

    /// Register a field descriptor on the schema being built.
    pub fn register<D: FieldDescriptor>(mut self, descriptor: &D) -> Result<Self> {
        self.schema.register(descriptor)?;
        Ok(self)
    }

    /// Build the final schema.
    pub fn build(self) -> Result<Schema> {
        self.schema.validate()?;
        Ok(self.schema)
    }
}
