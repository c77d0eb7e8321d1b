//! # Schemas
//!
//! A [`Schema`] is the ordered set of field definitions for one form.
//! Field order is insertion order and drives both the field list handed
//! to UIs and the order in which validation visits fields.
//!
//! Schemas are immutable once built. Validation only reads them, so a
//! single schema can serve concurrent validations from many threads.

use std::path::Path;

use formcheck_core::{FieldValue, FormcheckError, Submission};
use indexmap::IndexMap;

use crate::document::{self, SchemaDocumentError};
use crate::field::{FieldDefinition, Required, Rule};

/// Ordered mapping from field name to definition.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, FieldDefinition>,
}

impl Schema {
    /// Start building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Load a schema from YAML text.
    ///
    /// # Errors
    ///
    /// See [`SchemaDocumentError`].
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaDocumentError> {
        document::load_str(text, "<yaml>")
    }

    /// Load a schema from JSON text. Field and rule order follow the text.
    ///
    /// # Errors
    ///
    /// See [`SchemaDocumentError`].
    pub fn from_json_str(text: &str) -> Result<Self, SchemaDocumentError> {
        document::load_str(text, "<json>")
    }

    /// Load a schema from a `.yaml`, `.yml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaDocumentError::Io`] if the file cannot be read, and
    /// the other variants as for [`Schema::from_yaml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaDocumentError> {
        document::load_file(path.as_ref())
    }

    pub(crate) fn from_fields(fields: IndexMap<String, FieldDefinition>) -> Self {
        Self { fields }
    }

    /// Field names in schema order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    /// The definition for `name`.
    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    /// Iterate `(name, definition)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema defines no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Attach a custom rule to an existing field. Schema documents cannot
    /// express closures, so loaded schemas gain them here.
    ///
    /// # Errors
    ///
    /// Returns [`FormcheckError::UnknownField`] if `field` is not defined.
    pub fn with_custom_rule<F>(
        mut self,
        field: &str,
        id: impl Into<String>,
        predicate: F,
    ) -> Result<Self, FormcheckError>
    where
        F: Fn(&Submission, &FieldValue) -> bool + Send + Sync + 'static,
    {
        let def = self
            .fields
            .get_mut(field)
            .ok_or_else(|| FormcheckError::UnknownField(field.to_string()))?;
        def.insert_rule(Rule::Custom {
            id: id.into(),
            predicate: std::sync::Arc::new(predicate),
        });
        Ok(self)
    }

    /// Replace a field's requiredness with a conditional check.
    ///
    /// # Errors
    ///
    /// Returns [`FormcheckError::UnknownField`] if `field` is not defined.
    pub fn with_required_if<F>(mut self, field: &str, f: F) -> Result<Self, FormcheckError>
    where
        F: Fn(&Submission) -> bool + Send + Sync + 'static,
    {
        let def = self
            .fields
            .get_mut(field)
            .ok_or_else(|| FormcheckError::UnknownField(field.to_string()))?;
        def.set_required(Required::when(f));
        Ok(self)
    }
}

/// Builder for [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: IndexMap<String, FieldDefinition>,
}

impl SchemaBuilder {
    /// Add a field. Re-adding a name replaces its definition but keeps its
    /// first position.
    pub fn field(mut self, name: impl Into<String>, definition: FieldDefinition) -> Self {
        self.fields.insert(name.into(), definition);
        self
    }

    /// Finish building.
    pub fn build(self) -> Schema {
        Schema::from_fields(self.fields)
    }
}
