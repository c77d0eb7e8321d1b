//! # Field Values
//!
//! `FieldValue` is a single submitted form value. Forms submit text, but
//! programmatic callers also hand over numbers, booleans and dates, so the
//! model keeps the primitive kind and defines one textual coercion
//! ([`FieldValue::to_text`]) that every check goes through.
//!
//! ## Presence
//!
//! A value is *present* when its textual form is non-empty. Numeric `0`,
//! boolean `false` and the string `"0"` are all present; only the empty
//! string is absent. A missing key is absent as well, which is handled by
//! [`crate::Submission`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::FormcheckError;
use crate::temporal::format_date;

/// A primitive value submitted for one form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free text, as typed into an input.
    Text(String),
    /// A number supplied by a programmatic caller.
    Number(f64),
    /// A checkbox-style boolean.
    Bool(bool),
    /// A date/time instant.
    Date(DateTime<Utc>),
}

impl FieldValue {
    /// The textual form of the value, used for presence and by every
    /// predicate.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => number_text(*n),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Date(dt) => format_date(dt),
        }
    }

    /// Whether the value counts as supplied (non-empty textual form).
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Number(_) | FieldValue::Bool(_) | FieldValue::Date(_) => true,
        }
    }

    /// Borrow the text if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert a JSON value submitted for `field`.
    ///
    /// `null` means "no value" and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`FormcheckError::UnsupportedValue`] for arrays and objects.
    pub fn from_json(field: &str, value: &Value) -> Result<Option<Self>, FormcheckError> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(FieldValue::Text(s.clone()))),
            Value::Bool(b) => Ok(Some(FieldValue::Bool(*b))),
            Value::Number(n) => Ok(n.as_f64().map(FieldValue::Number)),
            Value::Array(_) => Err(FormcheckError::UnsupportedValue {
                field: field.to_string(),
                kind: "array",
            }),
            Value::Object(_) => Err(FormcheckError::UnsupportedValue {
                field: field.to_string(),
                kind: "object",
            }),
        }
    }
}

/// Number rendering: integral values carry no fractional part and
/// non-finite values use the `NaN` / `Infinity` spellings forms expect.
fn number_text(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        // -0 renders as 0.
        "0".to_string()
    } else {
        format!("{n}")
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(f64::from(n))
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(f64::from(n))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(dt: DateTime<Utc>) -> Self {
        FieldValue::Date(dt)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Date(dt) => serializer.serialize_str(&format_date(dt)),
        }
    }
}

struct FieldValueVisitor;

impl<'de> Visitor<'de> for FieldValueVisitor {
    type Value = FieldValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<FieldValue, E> {
        Ok(FieldValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldValue, E> {
        Ok(FieldValue::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldValue, E> {
        Ok(FieldValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<FieldValue, E> {
        Ok(FieldValue::Text(v))
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldValueVisitor)
    }
}
