//! # Validation Engine
//!
//! Evaluates one submission against a schema and collects failure
//! messages per field.
//!
//! ## Per-Field Evaluation
//!
//! Fields are visited in schema order. For each field:
//!
//! 1. The value is *present* when submitted with a non-empty textual form
//!    (`0`, `"0"` and `false` are present).
//! 2. If the field is required (always, or conditionally on the whole
//!    submission) and the value is absent, a `required` failure is
//!    recorded.
//! 3. If the value is present and the field has a `type`, the named
//!    predicate runs with no options.
//! 4. If the value is present, every rule runs in declaration order.
//!    Named rules go to the predicate library; custom rules call their
//!    closure with the submission and the value.
//!
//! Failures accumulate in that order. A field's override message, when
//! set, replaces every synthesized message for that field.
//!
//! ## Unknown Rules
//!
//! A `type` with no predicate always fails the field. A named rule with
//! no predicate is resolved by [`UnknownRulePolicy`]: passed by default,
//! failed when configured. Both cases are logged at `warn` level.
//!
//! Custom predicates are not isolated. A panicking predicate unwinds
//! through `validate` to the caller.

use formcheck_core::{FieldValue, RuleOptions, Submission};
use formcheck_predicates::PredicateLibrary;
use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{EngineConfig, UnknownRulePolicy};
use crate::field::{FieldDefinition, Rule};
use crate::messages::synthesize;
use crate::schema::Schema;

/// Failure messages per field, in schema order. Fields without failures
/// are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    errors: IndexMap<String, Vec<String>>,
}

impl ErrorMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &str, message: String) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message);
    }

    /// Messages for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// Returns true if `field` failed.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Returns true if every field passed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failing field names in schema order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Iterate `(field, messages)` in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Consume into the underlying ordered map.
    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.errors
    }
}

impl IntoIterator for ErrorMap {
    type Item = (String, Vec<String>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Validate `submission` against `schema`.
///
/// A missing submission (`None`) has no errors.
pub fn validate(
    schema: &Schema,
    submission: Option<&Submission>,
    library: &PredicateLibrary,
    config: &EngineConfig,
) -> ErrorMap {
    let mut errors = ErrorMap::new();
    let Some(submission) = submission else {
        return errors;
    };

    for (name, def) in schema.iter() {
        let value = submission.get(name).filter(|v| v.is_present());
        let checker = FieldChecker {
            name,
            def,
            library,
            config,
        };

        if value.is_none() && def.requirement().is_active(submission) {
            errors.push(name, checker.message("required", &RuleOptions::None));
        }

        let Some(value) = value else {
            continue;
        };
        let text = value.to_text();

        if let Some(type_id) = def.field_type() {
            if !checker.field_type(type_id, &text) {
                errors.push(name, checker.message(type_id, &RuleOptions::None));
            }
        }

        for rule in def.rules() {
            if !checker.rule(rule, submission, value, &text) {
                errors.push(name, checker.message(rule.id(), rule.options()));
            }
        }
    }

    tracing::debug!(
        fields = schema.len(),
        invalid = errors.len(),
        "validated submission"
    );
    errors
}

struct FieldChecker<'a> {
    name: &'a str,
    def: &'a FieldDefinition,
    library: &'a PredicateLibrary,
    config: &'a EngineConfig,
}

impl FieldChecker<'_> {
    fn message(&self, rule_id: &str, options: &RuleOptions) -> String {
        match self.def.error_override() {
            Some(message) => message.to_string(),
            None => synthesize(rule_id, self.def.label(), options),
        }
    }

    fn rule(&self, rule: &Rule, submission: &Submission, value: &FieldValue, text: &str) -> bool {
        match rule {
            Rule::Named { id, options } => self.named(id, text, options),
            Rule::Custom { predicate, .. } => predicate(submission, value),
        }
    }

    fn field_type(&self, id: &str, text: &str) -> bool {
        if let Some(valid) = self.library.evaluate(id, text, &RuleOptions::None) {
            return valid;
        }
        tracing::warn!(rule = %id, field = %self.name, "missing predicate for type, treating as failed");
        false
    }

    fn named(&self, id: &str, text: &str, options: &RuleOptions) -> bool {
        if let Some(valid) = self.library.evaluate(id, text, options) {
            return valid;
        }
        match self.config.unknown_rule {
            UnknownRulePolicy::Pass => {
                tracing::warn!(rule = %id, field = %self.name, "missing predicate for rule, treating as passed");
                true
            }
            UnknownRulePolicy::Fail => {
                tracing::warn!(rule = %id, field = %self.name, "missing predicate for rule, treating as failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldDefinition;

    fn run(schema: &Schema, submission: &Submission) -> ErrorMap {
        validate(
            schema,
            Some(submission),
            &PredicateLibrary::builtin(),
            &EngineConfig::default(),
        )
    }

    fn messages<'a>(errors: &'a ErrorMap, field: &str) -> Vec<&'a str> {
        errors
            .get(field)
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_none_submission_is_empty() {
        let schema = Schema::builder()
            .field("name", FieldDefinition::new("Name").required())
            .build();
        let errors = validate(
            &schema,
            None,
            &PredicateLibrary::builtin(),
            &EngineConfig::default(),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_required_missing_and_empty() {
        let schema = Schema::builder()
            .field("name", FieldDefinition::new("Name").required())
            .build();
        let errors = run(&schema, &Submission::new());
        assert_eq!(messages(&errors, "name"), vec!["Name is Required"]);
        let errors = run(&schema, &Submission::new().with("name", ""));
        assert_eq!(messages(&errors, "name"), vec!["Name is Required"]);
    }

    #[test]
    fn test_falsy_values_are_present() {
        let schema = Schema::builder()
            .field("latitude", FieldDefinition::new("Latitude").required())
            .build();
        for value in [FieldValue::from(0), FieldValue::from("0"), FieldValue::from(false)] {
            let submission = Submission::new().with("latitude", value);
            assert!(run(&schema, &submission).is_empty());
        }
    }

    #[test]
    fn test_absent_optional_field_skips_all_checks() {
        let schema = Schema::builder()
            .field(
                "email",
                FieldDefinition::new("Email")
                    .with_type("email")
                    .custom_rule("never", |_, _| false),
            )
            .build();
        assert!(run(&schema, &Submission::new()).is_empty());
        assert!(run(&schema, &Submission::new().with("email", "")).is_empty());
    }

    #[test]
    fn test_type_then_rules_order() {
        let schema = Schema::builder()
            .field(
                "score",
                FieldDefinition::new("Score")
                    .with_type("numeric")
                    .rule("int", RuleOptions::between(0, 100))
                    .rule("length", RuleOptions::max(2)),
            )
            .build();
        let errors = run(&schema, &Submission::new().with("score", "abc"));
        assert_eq!(
            messages(&errors, "score"),
            vec![
                "Score should only contain numbers",
                "Score should be between 0 and 100",
                "Score should be a maximum of 2 characters",
            ]
        );
    }

    #[test]
    fn test_numeric_type_passes_int_range_fails() {
        let schema = Schema::builder()
            .field(
                "score",
                FieldDefinition::new("Score")
                    .with_type("numeric")
                    .rule("int", RuleOptions::between(0, 100)),
            )
            .build();
        let errors = run(&schema, &Submission::new().with("score", "101"));
        assert_eq!(
            messages(&errors, "score"),
            vec!["Score should be between 0 and 100"]
        );
    }

    #[test]
    fn test_override_applies_to_every_failure() {
        let schema = Schema::builder()
            .field(
                "email",
                FieldDefinition::new("Email")
                    .required()
                    .with_type("email")
                    .rule("length", RuleOptions::min(20))
                    .error("You must enter an email address for your account"),
            )
            .build();
        let errors = run(&schema, &Submission::new().with("email", "example.com"));
        assert_eq!(
            messages(&errors, "email"),
            vec![
                "You must enter an email address for your account",
                "You must enter an email address for your account",
            ]
        );
        let errors = run(&schema, &Submission::new());
        assert_eq!(
            messages(&errors, "email"),
            vec!["You must enter an email address for your account"]
        );
    }

    #[test]
    fn test_custom_rule_receives_submission_and_value() {
        let schema = Schema::builder()
            .field(
                "confirm",
                FieldDefinition::new("Confirm").custom_rule("matches", |submission, value| {
                    submission.get("password") == Some(value)
                }),
            )
            .build();
        let ok = Submission::new()
            .with("password", "hunter22")
            .with("confirm", "hunter22");
        assert!(run(&schema, &ok).is_empty());
        let bad = Submission::new()
            .with("password", "hunter22")
            .with("confirm", "hunter23");
        assert_eq!(messages(&run(&schema, &bad), "confirm"), vec!["Confirm is Invalid"]);
    }

    #[test]
    fn test_custom_rule_shadows_builtin_id() {
        let schema = Schema::builder()
            .field(
                "email",
                FieldDefinition::new("Email").custom_rule("email", |_, _| true),
            )
            .build();
        assert!(run(&schema, &Submission::new().with("email", "not-an-email")).is_empty());
    }

    #[test]
    fn test_unknown_rule_passes_by_default() {
        let schema = Schema::builder()
            .field(
                "code",
                FieldDefinition::new("Code").rule("postalCode", RuleOptions::None),
            )
            .build();
        assert!(run(&schema, &Submission::new().with("code", "x")).is_empty());
    }

    #[test]
    fn test_unknown_type_fails_by_default() {
        let schema = Schema::builder()
            .field(
                "code",
                FieldDefinition::new("Code")
                    .with_type("isbn")
                    .rule("postalCode", RuleOptions::None),
            )
            .build();
        let errors = run(&schema, &Submission::new().with("code", "978"));
        assert_eq!(messages(&errors, "code"), vec!["Code is Invalid"]);
    }

    #[test]
    fn test_unknown_type_uses_override() {
        let schema = Schema::builder()
            .field(
                "isbn",
                FieldDefinition::new("ISBN")
                    .with_type("isbn")
                    .error("Enter a valid ISBN"),
            )
            .build();
        let errors = run(&schema, &Submission::new().with("isbn", "978"));
        assert_eq!(messages(&errors, "isbn"), vec!["Enter a valid ISBN"]);
        assert!(run(&schema, &Submission::new()).is_empty());
    }

    #[test]
    fn test_unknown_rule_fails_when_configured() {
        let schema = Schema::builder()
            .field(
                "code",
                FieldDefinition::new("Code")
                    .with_type("isbn")
                    .rule("postalCode", RuleOptions::None),
            )
            .build();
        let errors = validate(
            &schema,
            Some(&Submission::new().with("code", "x")),
            &PredicateLibrary::builtin(),
            &EngineConfig::new(UnknownRulePolicy::Fail),
        );
        assert_eq!(
            messages(&errors, "code"),
            vec!["Code is Invalid", "Code is Invalid"]
        );
    }

    #[test]
    fn test_error_map_follows_schema_order() {
        let schema = Schema::builder()
            .field("b", FieldDefinition::new("B").required())
            .field("a", FieldDefinition::new("A").required())
            .field("c", FieldDefinition::new("C"))
            .build();
        let errors = run(&schema, &Submission::new());
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(!errors.contains("c"));
        assert_eq!(errors.len(), 2);
        let inner = errors.into_inner();
        assert_eq!(inner.keys().collect::<Vec<_>>(), ["b", "a"]);
    }

    #[test]
    fn test_error_map_serializes_as_object() {
        let schema = Schema::builder()
            .field("name", FieldDefinition::new("Name").required())
            .build();
        let errors = run(&schema, &Submission::new());
        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"name":["Name is Required"]}"#
        );
    }

    #[test]
    fn test_numbers_checked_by_textual_form() {
        let schema = Schema::builder()
            .field(
                "age",
                FieldDefinition::new("Age").rule("int", RuleOptions::between(18, 65)),
            )
            .build();
        assert!(run(&schema, &Submission::new().with("age", 30)).is_empty());
        assert_eq!(
            messages(&run(&schema, &Submission::new().with("age", 30.5)), "age"),
            vec!["Age should be between 18 and 65"]
        );
    }
}
