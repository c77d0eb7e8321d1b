//! # Submissions
//!
//! A `Submission` is the full set of values a form posted, keyed by field
//! name. It is owned by the caller and only ever read by validation.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::FormcheckError;
use crate::value::FieldValue;

/// Submitted form values keyed by field name.
///
/// Deserializes from a plain object; `null` entries are not submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Submission {
    values: HashMap<String, FieldValue>,
}

impl Submission {
    /// Create an empty submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set the value for a field, returning the previous one.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.values.insert(field.into(), value.into())
    }

    /// Remove a field's value.
    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.values.remove(field)
    }

    /// The raw value for a field, if one was submitted.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Whether the field has a value with a non-empty textual form.
    pub fn is_present(&self, field: &str) -> bool {
        self.values.get(field).is_some_and(FieldValue::is_present)
    }

    /// Number of submitted keys (present or not).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over submitted `(field, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a submission from a JSON object.
    ///
    /// `null` entries are treated as not submitted.
    ///
    /// # Errors
    ///
    /// Returns [`FormcheckError::InvalidSubmission`] if `value` is not an
    /// object, and [`FormcheckError::UnsupportedValue`] if any entry is an
    /// array or object.
    pub fn from_json(value: &Value) -> Result<Self, FormcheckError> {
        let object = value.as_object().ok_or_else(|| {
            FormcheckError::InvalidSubmission(format!(
                "expected a JSON object of field values, got {}",
                json_kind(value)
            ))
        })?;

        let mut values = HashMap::with_capacity(object.len());
        for (field, raw) in object {
            if let Some(v) = FieldValue::from_json(field, raw)? {
                values.insert(field.clone(), v);
            }
        }
        Ok(Self { values })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<'de> Deserialize<'de> for Submission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, Option<FieldValue>>::deserialize(deserializer)?;
        Ok(Self {
            values: raw
                .into_iter()
                .filter_map(|(field, value)| value.map(|v| (field, v)))
                .collect(),
        })
    }
}

impl<K, V> FromIterator<(K, V)> for Submission
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
