//! # Rule Options
//!
//! The parameters a named rule is declared with. A schema writes them in
//! one of four shapes, and predicates and messages both read them:
//!
//! | shape | example | used by |
//! |---|---|---|
//! | none | `email: ~` | most predicates |
//! | range | `int: { min: 0, max: 100 }` | `int`, `float`, `length` |
//! | scalar | `before: 2026-01-01` | `before`, `after`, `equals`, `contains` |
//! | list | `in: [red, green, blue]` | `in` |
//!
//! Range bounds are kept as raw [`FieldValue`]s. Whether a bound is a
//! usable integer is decided when it is read ([`Bounds::min_int`]), so a
//! malformed bound degrades to "not set" instead of failing schema
//! construction.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::FormcheckError;
use crate::value::FieldValue;

/// Lower/upper bounds for range-style rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bounds {
    /// Lower bound, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<FieldValue>,
    /// Upper bound, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<FieldValue>,
}

impl Bounds {
    /// Bounds with neither side set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lower bound.
    pub fn with_min(mut self, min: impl Into<FieldValue>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Set the upper bound.
    pub fn with_max(mut self, max: impl Into<FieldValue>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// The lower bound's text if it is a valid integer. Magnitude is not
    /// limited, so the text is kept rather than narrowed to a machine int.
    pub fn min_int(&self) -> Option<String> {
        self.min.as_ref().and_then(valid_integer)
    }

    /// The upper bound's text if it is a valid integer.
    pub fn max_int(&self) -> Option<String> {
        self.max.as_ref().and_then(valid_integer)
    }

    /// The lower bound as a finite number.
    pub fn min_number(&self) -> Option<f64> {
        self.min.as_ref().and_then(finite_number)
    }

    /// The upper bound as a finite number.
    pub fn max_number(&self) -> Option<f64> {
        self.max.as_ref().and_then(finite_number)
    }
}

/// Options attached to a named rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RuleOptions {
    /// No options supplied.
    #[default]
    None,
    /// `{ min, max }` style bounds.
    Range(Bounds),
    /// A single comparison value.
    Scalar(FieldValue),
    /// An enumeration of allowed values.
    List(Vec<FieldValue>),
}

impl RuleOptions {
    /// Range options with only a lower bound.
    pub fn min(min: impl Into<FieldValue>) -> Self {
        RuleOptions::Range(Bounds::new().with_min(min))
    }

    /// Range options with only an upper bound.
    pub fn max(max: impl Into<FieldValue>) -> Self {
        RuleOptions::Range(Bounds::new().with_max(max))
    }

    /// Range options with both bounds.
    pub fn between(min: impl Into<FieldValue>, max: impl Into<FieldValue>) -> Self {
        RuleOptions::Range(Bounds::new().with_min(min).with_max(max))
    }

    /// A single comparison value.
    pub fn scalar(value: impl Into<FieldValue>) -> Self {
        RuleOptions::Scalar(value.into())
    }

    /// An enumeration of allowed values.
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        RuleOptions::List(values.into_iter().map(Into::into).collect())
    }

    /// Returns true when no options were supplied.
    pub fn is_none(&self) -> bool {
        matches!(self, RuleOptions::None)
    }

    /// The bounds, for range-style options.
    pub fn bounds(&self) -> Option<&Bounds> {
        match self {
            RuleOptions::Range(b) => Some(b),
            _ => None,
        }
    }

    /// The comparison value, for scalar options.
    pub fn as_scalar(&self) -> Option<&FieldValue> {
        match self {
            RuleOptions::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// The allowed values, for list options.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            RuleOptions::List(items) => Some(items),
            _ => None,
        }
    }

    /// Render the options for inclusion in a message.
    ///
    /// Returns `None` when no options were supplied.
    pub fn display_text(&self) -> Option<String> {
        match self {
            RuleOptions::None => None,
            RuleOptions::Scalar(v) => Some(v.to_text()),
            RuleOptions::List(items) => Some(
                items
                    .iter()
                    .map(FieldValue::to_text)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            RuleOptions::Range(b) => {
                let mut parts = Vec::new();
                if let Some(min) = &b.min {
                    parts.push(format!("min {min}"));
                }
                if let Some(max) = &b.max {
                    parts.push(format!("max {max}"));
                }
                Some(parts.join(", "))
            }
        }
    }

    /// Interpret a JSON value as rule options.
    ///
    /// # Errors
    ///
    /// Returns [`FormcheckError::UnsupportedValue`] when a bound or list
    /// item is itself an array or object.
    pub fn from_json(value: &Value) -> Result<Self, FormcheckError> {
        match value {
            Value::Null => Ok(RuleOptions::None),
            Value::Object(map) => {
                let min = match map.get("min") {
                    Some(v) => FieldValue::from_json("min", v)?,
                    None => None,
                };
                let max = match map.get("max") {
                    Some(v) => FieldValue::from_json("max", v)?,
                    None => None,
                };
                Ok(RuleOptions::Range(Bounds { min, max }))
            }
            Value::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(v) = FieldValue::from_json("in", item)? {
                        values.push(v);
                    }
                }
                Ok(RuleOptions::List(values))
            }
            scalar => Ok(FieldValue::from_json("option", scalar)?
                .map(RuleOptions::Scalar)
                .unwrap_or_default()),
        }
    }
}

impl<'de> Deserialize<'de> for RuleOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        RuleOptions::from_json(&value).map_err(serde::de::Error::custom)
    }
}

impl From<Bounds> for RuleOptions {
    fn from(b: Bounds) -> Self {
        RuleOptions::Range(b)
    }
}

impl From<FieldValue> for RuleOptions {
    fn from(v: FieldValue) -> Self {
        RuleOptions::Scalar(v)
    }
}

/// Whether `text` is an integer written in plain decimal: an optional
/// sign, then `0` or a digit string without leading zeros.
pub fn is_integer_text(text: &str) -> bool {
    let digits = text
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(text);
    match digits.as_bytes() {
        [] => false,
        [b'0'] => true,
        [first, rest @ ..] => {
            (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit)
        }
    }
}

fn valid_integer(value: &FieldValue) -> Option<String> {
    Some(value.to_text()).filter(|text| is_integer_text(text))
}

fn finite_number(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) if n.is_finite() => Some(*n),
        FieldValue::Number(_) => None,
        other => other
            .to_text()
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite()),
    }
}
