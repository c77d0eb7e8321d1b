//! # Forms
//!
//! A [`Form`] binds a schema to a predicate library and engine
//! configuration. It is what callers hold on to: UIs read
//! [`Form::fields`] to lay out inputs and call [`Form::validate`] on each
//! submission.
//!
//! `Form` is cheap to clone. The schema and library sit behind `Arc`, so
//! clones share them and can move freely across threads.

use std::sync::Arc;

use formcheck_core::{FormcheckError, Submission};
use formcheck_predicates::PredicateLibrary;
use serde_json::Value;

use crate::config::EngineConfig;
use crate::engine::{self, ErrorMap};
use crate::schema::Schema;

/// Shorthand for [`Form::build`].
pub fn build(schema: Schema) -> Form {
    Form::build(schema)
}

/// A schema ready to validate submissions.
#[derive(Debug, Clone)]
pub struct Form {
    schema: Arc<Schema>,
    fields: Vec<String>,
    library: Arc<PredicateLibrary>,
    config: EngineConfig,
}

impl Form {
    /// Build a form from a schema, using the builtin predicates and the
    /// default engine configuration.
    pub fn build(schema: Schema) -> Self {
        let fields = schema.field_names();
        tracing::debug!(fields = fields.len(), "built form");
        Self {
            schema: Arc::new(schema),
            fields,
            library: Arc::new(PredicateLibrary::builtin()),
            config: EngineConfig::default(),
        }
    }

    /// Use `library` instead of the builtin predicates.
    pub fn with_library(mut self, library: impl Into<Arc<PredicateLibrary>>) -> Self {
        self.library = library.into();
        self
    }

    /// Use `config` for unknown-rule handling.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Field names in schema order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The schema this form validates against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Predicates used for `type` and named rules.
    pub fn library(&self) -> &PredicateLibrary {
        &self.library
    }

    /// Engine configuration in effect.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate a submission. `None` yields an empty map.
    pub fn validate(&self, submission: Option<&Submission>) -> ErrorMap {
        engine::validate(&self.schema, submission, &self.library, &self.config)
    }

    /// Validate a JSON submission. `null` yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`FormcheckError::InvalidSubmission`] if `json` is not an
    /// object, and [`FormcheckError::UnsupportedValue`] if a field holds an
    /// array or object.
    pub fn validate_json(&self, json: &Value) -> Result<ErrorMap, FormcheckError> {
        if json.is_null() {
            return Ok(ErrorMap::new());
        }
        let submission = Submission::from_json(json)?;
        Ok(self.validate(Some(&submission)))
    }
}
