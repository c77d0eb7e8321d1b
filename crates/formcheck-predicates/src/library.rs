//! # Predicate Registry
//!
//! Maps rule ids to predicate functions. The registry is built once
//! (usually [`PredicateLibrary::builtin`]) and then only read, so it can be
//! shared freely across threads behind an `Arc`.
//!
//! ## Rule Keys
//!
//! Schemas spell rule ids however their authors like (`creditCard`,
//! `credit-card`, `URL`). Lookups go through [`rule_key`], which folds
//! ASCII case and drops `-`, `_` and spaces, so all spellings of one id
//! resolve to the same entry. An id with no entry yields `None`; deciding
//! what an unknown rule means is the caller's concern.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use formcheck_core::RuleOptions;

use crate::{date, number, text};

/// A named check over a value's textual form and the rule's options.
pub type Predicate = Arc<dyn Fn(&str, &RuleOptions) -> bool + Send + Sync>;

/// Normalize a rule id into its registry key.
pub fn rule_key(id: &str) -> String {
    id.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Registry of predicates keyed by normalized rule id.
#[derive(Clone, Default)]
pub struct PredicateLibrary {
    entries: BTreeMap<String, Predicate>,
}

impl PredicateLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The library with every builtin predicate registered.
    pub fn builtin() -> Self {
        let mut lib = Self::new();

        // Format checks.
        lib.register_fn("email", text::is_email);
        lib.register_fn("url", text::is_url);
        lib.register_fn("alpha", text::is_alpha);
        lib.register_fn("alphanumeric", text::is_alphanumeric);
        lib.register_fn("ascii", text::is_ascii);
        lib.register_fn("lowercase", text::is_lowercase);
        lib.register_fn("uppercase", text::is_uppercase);
        lib.register_fn("hexadecimal", text::is_hexadecimal);
        lib.register_fn("hexColor", text::is_hex_color);
        lib.register_fn("creditCard", text::is_credit_card);
        lib.register_fn("uuid", text::is_uuid);
        lib.register_fn("json", text::is_json);
        lib.register_fn("boolean", text::is_boolean);

        // Text comparisons.
        lib.register_fn("length", text::is_length);
        lib.register_fn("in", text::is_in);
        lib.register_fn("equals", text::equals);
        lib.register_fn("contains", text::contains);

        // Numbers.
        lib.register_fn("int", number::is_int);
        lib.register_fn("float", number::is_float);
        lib.register_fn("numeric", number::is_numeric);
        lib.register_fn("decimal", number::is_decimal);

        // Dates.
        lib.register_fn("date", date::is_date);
        lib.register_fn("before", date::is_before);
        lib.register_fn("after", date::is_after);

        lib
    }

    /// Add or replace the predicate for `id`.
    pub fn register(&mut self, id: &str, predicate: Predicate) -> &mut Self {
        self.entries.insert(rule_key(id), predicate);
        self
    }

    /// Add or replace the predicate for `id` from a plain function or closure.
    pub fn register_fn<F>(&mut self, id: &str, predicate: F) -> &mut Self
    where
        F: Fn(&str, &RuleOptions) -> bool + Send + Sync + 'static,
    {
        self.register(id, Arc::new(predicate))
    }

    /// Builder-style [`register_fn`](Self::register_fn).
    pub fn with<F>(mut self, id: &str, predicate: F) -> Self
    where
        F: Fn(&str, &RuleOptions) -> bool + Send + Sync + 'static,
    {
        self.register_fn(id, predicate);
        self
    }

    /// Look up the predicate for `id`.
    pub fn lookup(&self, id: &str) -> Option<&Predicate> {
        self.entries.get(&rule_key(id))
    }

    /// Returns true if `id` resolves to a predicate.
    pub fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_some()
    }

    /// Run the predicate for `id`, or `None` if there is no such predicate.
    pub fn evaluate(&self, id: &str, value: &str, options: &RuleOptions) -> Option<bool> {
        self.lookup(id).map(|predicate| predicate(value, options))
    }

    /// Registered keys, sorted.
    pub fn rule_ids(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Number of registered predicates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for PredicateLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateLibrary")
            .field("rule_ids", &self.rule_ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_key_normalization() {
        assert_eq!(rule_key("creditCard"), "creditcard");
        assert_eq!(rule_key("credit-card"), "creditcard");
        assert_eq!(rule_key("CREDIT_CARD"), "creditcard");
        assert_eq!(rule_key("URL"), "url");
    }

    #[test]
    fn test_builtin_resolves_all_spellings() {
        let lib = PredicateLibrary::builtin();
        assert!(lib.contains("URL"));
        assert!(lib.contains("url"));
        assert!(lib.contains("creditCard"));
        assert!(lib.contains("credit-card"));
        assert!(lib.contains("hex_color"));
    }

    #[test]
    fn test_unknown_id_is_none() {
        let lib = PredicateLibrary::builtin();
        assert!(lib.lookup("validCity").is_none());
        assert_eq!(lib.evaluate("validCity", "x", &RuleOptions::None), None);
    }

    #[test]
    fn test_evaluate_passes_options() {
        let lib = PredicateLibrary::builtin();
        assert_eq!(
            lib.evaluate("int", "101", &RuleOptions::between(0, 100)),
            Some(false)
        );
        assert_eq!(
            lib.evaluate("int", "78", &RuleOptions::between(0, 100)),
            Some(true)
        );
    }

    #[test]
    fn test_register_replaces_builtin() {
        let lib = PredicateLibrary::builtin().with("Email", |_, _| true);
        assert_eq!(lib.evaluate("email", "not an email", &RuleOptions::None), Some(true));
    }

    #[test]
    fn test_rule_ids_are_sorted_keys() {
        let lib = PredicateLibrary::new()
            .with("zeta", |_, _| true)
            .with("Alpha", |_, _| true);
        assert_eq!(lib.rule_ids(), vec!["alpha", "zeta"]);
        assert_eq!(lib.len(), 2);
        assert!(!lib.is_empty());
    }

    #[test]
    fn test_debug_lists_ids() {
        let lib = PredicateLibrary::new().with("email", |_, _| true);
        assert!(format!("{lib:?}").contains("email"));
    }
}
