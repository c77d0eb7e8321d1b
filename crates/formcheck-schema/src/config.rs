//! # Engine Configuration
//!
//! Knobs that change how the validation engine treats edge cases. Loaded
//! from YAML/JSON alongside schemas, or built in code.
//!
//! ```yaml
//! unknown_rule: fail
//! ```

use formcheck_core::FormcheckError;
use serde::{Deserialize, Serialize};

/// What to do when a `validate` rule names a predicate the library does
/// not have. An unknown `type` always fails regardless of this policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownRulePolicy {
    /// Log a warning and treat the rule as satisfied. Existing schemas may
    /// rely on this.
    #[default]
    Pass,
    /// Log a warning and mark the field invalid for that rule.
    Fail,
}

/// Validation engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Handling of rules with no matching predicate.
    pub unknown_rule: UnknownRulePolicy,
}

impl EngineConfig {
    /// Default configuration with the given unknown-rule policy.
    pub fn new(unknown_rule: UnknownRulePolicy) -> Self {
        Self { unknown_rule }
    }

    /// Parse configuration from YAML (or JSON) text. Missing keys take
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FormcheckError::Config`] if the text is malformed or names
    /// an unknown policy.
    pub fn from_yaml_str(text: &str) -> Result<Self, FormcheckError> {
        serde_yaml::from_str(text).map_err(|e| FormcheckError::Config(e.to_string()))
    }
}
