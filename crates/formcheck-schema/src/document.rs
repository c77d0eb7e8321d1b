//! # Schema Documents
//!
//! Loads form schemas written as YAML or JSON:
//!
//! ```yaml
//! fields:
//!   name:
//!     label: Name
//!     required: true
//!     validate:
//!       length: { min: 0, max: 20 }
//!   city:
//!     label: City
//!     required: { when_present: street-address }
//!     error: A valid City is required if you enter a Street Address
//! ```
//!
//! ## Structural Check
//!
//! Before a document is interpreted it is validated against an embedded
//! JSON Schema (Draft 2020-12). A document that fails is rejected with
//! every violation listed, each carrying the instance path, the schema
//! path and a readable message.
//!
//! ## Ordering
//!
//! JSON text is parsed with the YAML parser (JSON is a subset of YAML),
//! so field order and `validate` rule order always follow the text.

use std::fmt;
use std::path::Path;

use formcheck_core::RuleOptions;
use indexmap::IndexMap;
use jsonschema::Validator;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::field::{FieldDefinition, Required};
use crate::schema::Schema;

/// Draft 2020-12 schema every form schema document must satisfy.
const DOCUMENT_SCHEMA: &str = r##"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "$id": "https://formcheck.dev/schemas/form.schema.json",
  "type": "object",
  "required": ["fields"],
  "additionalProperties": false,
  "properties": {
    "fields": {
      "type": "object",
      "additionalProperties": { "$ref": "#/$defs/field" }
    }
  },
  "$defs": {
    "field": {
      "type": "object",
      "required": ["label"],
      "additionalProperties": false,
      "properties": {
        "label": { "type": "string" },
        "required": {
          "anyOf": [
            { "type": "boolean" },
            {
              "type": "object",
              "required": ["when_present"],
              "additionalProperties": false,
              "properties": {
                "when_present": { "type": "string", "minLength": 1 }
              }
            }
          ]
        },
        "type": { "type": "string", "minLength": 1 },
        "validate": {
          "type": "object",
          "additionalProperties": { "$ref": "#/$defs/options" }
        },
        "error": { "type": "string" }
      }
    },
    "primitive": { "type": ["string", "number", "boolean"] },
    "options": {
      "anyOf": [
        { "type": "null" },
        { "$ref": "#/$defs/primitive" },
        { "type": "array", "items": { "$ref": "#/$defs/primitive" } },
        {
          "type": "object",
          "additionalProperties": false,
          "properties": {
            "min": { "type": ["string", "number", "null"] },
            "max": { "type": ["string", "number", "null"] }
          }
        }
      ]
    }
  }
}"##;

/// Error loading a schema document.
#[derive(Error, Debug)]
pub enum SchemaDocumentError {
    /// The text is not well-formed YAML/JSON.
    #[error("cannot parse schema document '{source_name}': {reason}")]
    Parse {
        /// File path or `<yaml>` / `<json>` for in-memory text.
        source_name: String,
        /// Parser message.
        reason: String,
    },

    /// The document is well-formed but not a valid form schema.
    #[error("schema document '{source_name}' is invalid:\n{violations}")]
    Invalid {
        /// File path or `<yaml>` / `<json>` for in-memory text.
        source_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The embedded document schema could not be compiled.
    #[error("document schema build error: {reason}")]
    DocumentSchema {
        /// Reason the validator could not be built.
        reason: String,
    },

    /// The schema file could not be read.
    #[error("cannot read schema file '{path}': {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// A single structural violation in a schema document.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating value in the document.
    pub instance_path: String,
    /// JSON Pointer path within the document schema that rejected it.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of violations.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    fields: IndexMap<String, FieldDocument>,
}

#[derive(Debug, Deserialize)]
struct FieldDocument {
    label: String,
    #[serde(default)]
    required: RequiredDocument,
    #[serde(rename = "type", default)]
    field_type: Option<String>,
    #[serde(default)]
    validate: IndexMap<String, RuleOptions>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequiredDocument {
    Flag(bool),
    WhenPresent { when_present: String },
}

impl Default for RequiredDocument {
    fn default() -> Self {
        RequiredDocument::Flag(false)
    }
}

impl From<FieldDocument> for FieldDefinition {
    fn from(doc: FieldDocument) -> Self {
        let required = match doc.required {
            RequiredDocument::Flag(flag) => Required::from(flag),
            RequiredDocument::WhenPresent { when_present } => Required::when_present(when_present),
        };
        let mut def = FieldDefinition::new(doc.label).with_required(required);
        if let Some(field_type) = doc.field_type {
            def = def.with_type(field_type);
        }
        for (id, options) in doc.validate {
            def = def.rule(id, options);
        }
        if let Some(error) = doc.error {
            def = def.error(error);
        }
        def
    }
}

/// Compile the embedded document schema.
fn document_validator() -> Result<Validator, SchemaDocumentError> {
    let schema: Value =
        serde_json::from_str(DOCUMENT_SCHEMA).map_err(|e| SchemaDocumentError::DocumentSchema {
            reason: format!("invalid JSON: {e}"),
        })?;
    let mut opts = jsonschema::options();
    opts.with_draft(jsonschema::Draft::Draft202012);
    opts.build(&schema)
        .map_err(|e| SchemaDocumentError::DocumentSchema {
            reason: e.to_string(),
        })
}

/// Check a parsed document against the document schema.
fn check_structure(instance: &Value, source_name: &str) -> Result<(), SchemaDocumentError> {
    let validator = document_validator()?;

    let violations: Vec<Violation> = validator
        .iter_errors(instance)
        .map(|e| Violation {
            instance_path: e.instance_path.to_string(),
            schema_path: e.schema_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaDocumentError::Invalid {
            source_name: source_name.to_string(),
            violations: ValidationViolations { violations },
        })
    }
}

/// Load a schema from YAML or JSON text.
pub(crate) fn load_str(text: &str, source_name: &str) -> Result<Schema, SchemaDocumentError> {
    let parse_error = |reason: String| SchemaDocumentError::Parse {
        source_name: source_name.to_string(),
        reason,
    };

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
    let json = yaml_to_json_value(&yaml).map_err(parse_error)?;
    check_structure(&json, source_name)?;

    let document: SchemaDocument =
        serde_yaml::from_value(yaml).map_err(|e| parse_error(e.to_string()))?;

    let fields = document
        .fields
        .into_iter()
        .map(|(name, doc)| (name, FieldDefinition::from(doc)))
        .collect();

    tracing::debug!(source = source_name, "loaded schema document");
    Ok(Schema::from_fields(fields))
}

/// Load a schema from a file.
pub(crate) fn load_file(path: &Path) -> Result<Schema, SchemaDocumentError> {
    let text = std::fs::read_to_string(path).map_err(|source| SchemaDocumentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_str(&text, &path.display().to_string())
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Schema documents use only the JSON-compatible subset of YAML. Tags are
/// ignored and scalar map keys are stringified.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_core::Submission;

    const SAMPLE: &str = r#"
fields:
  name:
    label: Name
    required: true
    validate:
      length: { min: 0, max: 20 }
  street-address:
    label: Street Address
  city:
    label: City
    required: { when_present: street-address }
    error: A valid City is required if you enter a Street Address
  score:
    label: Score
    type: numeric
    validate:
      int: { min: 0, max: 100 }
      length: { max: 3 }
  category:
    label: Category
    validate:
      in: [red, green, blue]
"#;

    #[test]
    fn test_document_schema_compiles() {
        assert!(document_validator().is_ok());
    }

    #[test]
    fn test_load_yaml_sample() {
        let schema = load_str(SAMPLE, "<yaml>").unwrap();
        assert_eq!(
            schema.field_names(),
            vec!["name", "street-address", "city", "score", "category"]
        );
        let name = schema.get("name").unwrap();
        assert_eq!(name.label(), "Name");
        assert!(matches!(name.requirement(), Required::Always));
        assert_eq!(name.rules()[0].options(), &RuleOptions::between(0, 20));
    }

    #[test]
    fn test_rule_order_follows_document() {
        let schema = load_str(SAMPLE, "<yaml>").unwrap();
        let ids: Vec<&str> = schema
            .get("score")
            .unwrap()
            .rules()
            .iter()
            .map(|r| r.id())
            .collect();
        assert_eq!(ids, vec!["int", "length"]);
        assert_eq!(schema.get("score").unwrap().field_type(), Some("numeric"));
    }

    #[test]
    fn test_when_present_requirement() {
        let schema = load_str(SAMPLE, "<yaml>").unwrap();
        let city = schema.get("city").unwrap();
        assert!(city
            .requirement()
            .is_active(&Submission::new().with("street-address", "17 Budd St")));
        assert!(!city.requirement().is_active(&Submission::new()));
        assert_eq!(
            city.error_override(),
            Some("A valid City is required if you enter a Street Address")
        );
    }

    #[test]
    fn test_load_json_keeps_order() {
        let json = r#"{"fields": {"zeta": {"label": "Z"}, "alpha": {"label": "A", "validate": {"length": {"max": 3}, "alpha": null}}}}"#;
        let schema = load_str(json, "<json>").unwrap();
        assert_eq!(schema.field_names(), vec!["zeta", "alpha"]);
        let ids: Vec<&str> = schema.get("alpha").unwrap().rules().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["length", "alpha"]);
    }

    #[test]
    fn test_missing_label_is_rejected() {
        let err = load_str("fields:\n  name:\n    required: true\n", "<yaml>").unwrap_err();
        match &err {
            SchemaDocumentError::Invalid { violations, .. } => {
                assert!(!violations.is_empty());
                let messages: Vec<&str> =
                    violations.violations().iter().map(|v| v.message.as_str()).collect();
                assert!(
                    messages.iter().any(|m| m.contains("label")),
                    "Expected violation mentioning 'label', got: {messages:?}"
                );
            }
            other => panic!("Expected Invalid, got: {other}"),
        }
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let err = load_str("fields:\n  name:\n    label: Name\n    optional: true\n", "<yaml>")
            .unwrap_err();
        assert!(matches!(err, SchemaDocumentError::Invalid { .. }));
    }

    #[test]
    fn test_bad_required_shape_is_rejected() {
        let err = load_str(
            "fields:\n  city:\n    label: City\n    required: { when: street }\n",
            "<yaml>",
        )
        .unwrap_err();
        assert!(matches!(err, SchemaDocumentError::Invalid { .. }));
    }

    #[test]
    fn test_nested_options_are_rejected() {
        let err = load_str(
            "fields:\n  n:\n    label: N\n    validate:\n      int: { min: [1] }\n",
            "<yaml>",
        )
        .unwrap_err();
        match err {
            SchemaDocumentError::Invalid { violations, .. } => {
                assert!(violations
                    .violations()
                    .iter()
                    .any(|v| v.instance_path.contains("/fields/n/validate/int")));
            }
            other => panic!("Expected Invalid, got: {other}"),
        }
    }

    #[test]
    fn test_missing_fields_key_is_rejected() {
        let err = load_str("{}", "<json>").unwrap_err();
        assert!(matches!(err, SchemaDocumentError::Invalid { .. }));
    }

    #[test]
    fn test_unparseable_text() {
        let err = load_str("fields: [unclosed", "<yaml>").unwrap_err();
        assert!(matches!(err, SchemaDocumentError::Parse { .. }));
        assert!(err.to_string().contains("<yaml>"));
    }

    #[test]
    fn test_load_file_io_error() {
        let err = load_file(Path::new("/nonexistent/formcheck/schema.yaml")).unwrap_err();
        assert!(matches!(err, SchemaDocumentError::Io { .. }));
    }

    #[test]
    fn test_yaml_to_json_conversion() {
        let yaml_value: serde_yaml::Value =
            serde_yaml::from_str("label: Age\ncount: 42\nenabled: true\nitems: [one, two]\n")
                .unwrap();
        let json_value = yaml_to_json_value(&yaml_value).unwrap();
        assert_eq!(json_value["label"], "Age");
        assert_eq!(json_value["count"], 42);
        assert_eq!(json_value["enabled"], true);
        assert_eq!(json_value["items"][1], "two");
    }

    #[test]
    fn test_violation_display_format() {
        let v = Violation {
            instance_path: "/fields/name".to_string(),
            schema_path: "/properties/fields/additionalProperties/required".to_string(),
            message: r#""label" is a required property"#.to_string(),
        };
        let display = v.to_string();
        assert!(display.contains("/fields/name"));
        assert!(display.contains("required property"));
    }

    #[test]
    fn test_violation_display_root() {
        let v = Violation {
            instance_path: String::new(),
            schema_path: "/required".to_string(),
            message: r#""fields" is a required property"#.to_string(),
        };
        assert!(v.to_string().contains("(root)"));
    }
}
