//! # formcheck-schema - Form Schemas & Validation Engine
//!
//! Declares forms as ordered field definitions and validates submissions
//! against them, producing per-field error messages.
//!
//! ## Schemas (`field`, `schema`, `document`)
//!
//! A [`Schema`] maps field names to [`FieldDefinition`]s: a display label,
//! a requirement (never, always, or conditional on the submission), an
//! optional type predicate, an ordered list of rules and an optional
//! override message. Schemas are built in code or loaded from YAML/JSON
//! documents, which are checked against an embedded JSON Schema before
//! they are deserialized.
//!
//! ## Validation (`engine`, `messages`)
//!
//! [`validate`] walks the schema in order and returns an [`ErrorMap`].
//! Messages are synthesized from the rule id and field label by
//! [`synthesize`] unless the field overrides them.
//!
//! ## Forms (`form`)
//!
//! [`Form`] bundles a schema with a predicate library and an
//! [`EngineConfig`], and is the usual entry point:
//!
//! ```
//! use formcheck_core::Submission;
//! use formcheck_schema::{build, FieldDefinition, Schema};
//!
//! let schema = Schema::builder()
//!     .field("name", FieldDefinition::new("Name").required())
//!     .build();
//! let form = build(schema);
//! let errors = form.validate(Some(&Submission::new()));
//! assert_eq!(errors.get("name").unwrap(), ["Name is Required"]);
//! ```
//!
//! ## Crate Policy
//!
//! - Validation never fails with an error. Anything the engine can
//!   evaluate becomes a message in the map.
//! - Schemas are immutable after construction and shared read-only.

pub mod config;
pub mod document;
pub mod engine;
pub mod field;
pub mod form;
pub mod messages;
pub mod schema;

pub use config::{EngineConfig, UnknownRulePolicy};
pub use document::{SchemaDocumentError, ValidationViolations, Violation};
pub use engine::{validate, ErrorMap};
pub use field::{CustomPredicate, FieldDefinition, Required, RequiredFn, Rule};
pub use form::{build, Form};
pub use messages::synthesize;
pub use schema::{Schema, SchemaBuilder};
