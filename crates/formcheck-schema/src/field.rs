//! # Field Definitions
//!
//! One [`FieldDefinition`] per form field: its display label, when it is
//! required, an optional type check, the ordered rules applied to it, and
//! an optional override message.
//!
//! Requiredness and rules are tagged unions resolved when the schema is
//! built. A rule is either a named predicate looked up in the predicate
//! library, or a custom closure that sees the whole submission.

use std::fmt;
use std::sync::Arc;

use formcheck_core::{FieldValue, RuleOptions, Submission};

/// Decides conditional requiredness from the whole submission.
pub type RequiredFn = Arc<dyn Fn(&Submission) -> bool + Send + Sync>;

/// A custom rule: `(submission, field_value) -> valid`.
pub type CustomPredicate = Arc<dyn Fn(&Submission, &FieldValue) -> bool + Send + Sync>;

static NO_OPTIONS: RuleOptions = RuleOptions::None;

/// When a field must carry a value.
#[derive(Clone, Default)]
pub enum Required {
    /// Optional.
    #[default]
    Never,
    /// Always required.
    Always,
    /// Required when the function returns true for the submission.
    Conditional(RequiredFn),
}

impl Required {
    /// Required when `f` holds for the submission.
    pub fn when<F>(f: F) -> Self
    where
        F: Fn(&Submission) -> bool + Send + Sync + 'static,
    {
        Required::Conditional(Arc::new(f))
    }

    /// Required when `other` has a present value.
    pub fn when_present(other: impl Into<String>) -> Self {
        let other = other.into();
        Self::when(move |submission| submission.is_present(&other))
    }

    /// Whether the requirement applies to this submission.
    pub fn is_active(&self, submission: &Submission) -> bool {
        match self {
            Required::Never => false,
            Required::Always => true,
            Required::Conditional(f) => f(submission),
        }
    }
}

impl From<bool> for Required {
    fn from(required: bool) -> Self {
        if required {
            Required::Always
        } else {
            Required::Never
        }
    }
}

impl fmt::Debug for Required {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Required::Never => f.write_str("Never"),
            Required::Always => f.write_str("Always"),
            Required::Conditional(_) => f.write_str("Conditional(..)"),
        }
    }
}

/// A validation rule applied to a present value.
#[derive(Clone)]
pub enum Rule {
    /// A predicate from the library, called with these options.
    Named {
        /// Rule id, also used to pick the failure message.
        id: String,
        /// Options handed to the predicate and the message synthesizer.
        options: RuleOptions,
    },
    /// A caller-supplied predicate.
    Custom {
        /// Rule id, used to pick the failure message.
        id: String,
        /// The check itself.
        predicate: CustomPredicate,
    },
}

impl Rule {
    /// The rule id.
    pub fn id(&self) -> &str {
        match self {
            Rule::Named { id, .. } | Rule::Custom { id, .. } => id,
        }
    }

    /// Options for message synthesis. Custom rules have none.
    pub fn options(&self) -> &RuleOptions {
        match self {
            Rule::Named { options, .. } => options,
            Rule::Custom { .. } => &NO_OPTIONS,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Named { id, options } => f
                .debug_struct("Named")
                .field("id", id)
                .field("options", options)
                .finish(),
            Rule::Custom { id, .. } => f.debug_struct("Custom").field("id", id).finish(),
        }
    }
}

/// Everything the engine needs to check one field.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    label: String,
    required: Required,
    field_type: Option<String>,
    rules: Vec<Rule>,
    error: Option<String>,
}

impl FieldDefinition {
    /// An optional, unchecked field with the given display label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            required: Required::Never,
            field_type: None,
            rules: Vec::new(),
            error: None,
        }
    }

    /// Mark the field as always required.
    pub fn required(mut self) -> Self {
        self.required = Required::Always;
        self
    }

    /// Set requiredness explicitly.
    pub fn with_required(mut self, required: Required) -> Self {
        self.required = required;
        self
    }

    /// Required when `f` holds for the submission.
    pub fn required_if<F>(self, f: F) -> Self
    where
        F: Fn(&Submission) -> bool + Send + Sync + 'static,
    {
        self.with_required(Required::when(f))
    }

    /// Required when `other` has a present value.
    pub fn required_when_present(self, other: impl Into<String>) -> Self {
        self.with_required(Required::when_present(other))
    }

    /// Check present values against the named predicate `id`.
    pub fn with_type(mut self, id: impl Into<String>) -> Self {
        self.field_type = Some(id.into());
        self
    }

    /// Append a named rule. Re-declaring an id replaces it in place.
    pub fn rule(mut self, id: impl Into<String>, options: impl Into<RuleOptions>) -> Self {
        self.insert_rule(Rule::Named {
            id: id.into(),
            options: options.into(),
        });
        self
    }

    /// Append a custom rule. Re-declaring an id replaces it in place.
    pub fn custom_rule<F>(mut self, id: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Submission, &FieldValue) -> bool + Send + Sync + 'static,
    {
        self.insert_rule(Rule::Custom {
            id: id.into(),
            predicate: Arc::new(predicate),
        });
        self
    }

    /// Use `message` for every failure on this field.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    pub(crate) fn insert_rule(&mut self, rule: Rule) {
        match self.rules.iter().position(|r| r.id() == rule.id()) {
            Some(idx) => self.rules[idx] = rule,
            None => self.rules.push(rule),
        }
    }

    pub(crate) fn set_required(&mut self, required: Required) {
        self.required = required;
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Requiredness.
    pub fn requirement(&self) -> &Required {
        &self.required
    }

    /// Type-check predicate id.
    pub fn field_type(&self) -> Option<&str> {
        self.field_type.as_deref()
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Override message.
    pub fn error_override(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
