//! Numeric predicates. Values arrive as text; range bounds come from
//! `{ min, max }` options and are compared numerically.

use formcheck_core::{is_integer_text, Bounds, RuleOptions};
use once_cell::sync::Lazy;
use regex::Regex;

static FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?([0-9]*)(\.[0-9]*)?([eE][+-]?[0-9]+)?$").expect("float pattern compiles")
});

/// Integer without leading zeros, within optional `{ min, max }`.
pub fn is_int(value: &str, options: &RuleOptions) -> bool {
    is_integer_text(value) && within_bounds(value, options.bounds())
}

/// Floating point number, within optional `{ min, max }`.
pub fn is_float(value: &str, options: &RuleOptions) -> bool {
    if matches!(value, "" | "." | "+" | "-" | "+." | "-.") || !FLOAT.is_match(value) {
        return false;
    }
    // Reject an exponent with no mantissa digits, e.g. "e5".
    let mantissa = value
        .split(|c: char| c == 'e' || c == 'E')
        .next()
        .unwrap_or_default();
    if !mantissa.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    within_bounds(value, options.bounds())
}

/// Digits with an optional leading sign.
pub fn is_numeric(value: &str, _options: &RuleOptions) -> bool {
    let digits = value
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(value);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Decimal number: `12`, `12.5` or `.5`, with an optional leading sign.
pub fn is_decimal(value: &str, _options: &RuleOptions) -> bool {
    let unsigned = value
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(value);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    match fraction {
        None => !whole.is_empty() && all_digits(whole),
        Some(fraction) => !fraction.is_empty() && all_digits(whole) && all_digits(fraction),
    }
}

fn within_bounds(value: &str, bounds: Option<&Bounds>) -> bool {
    let Some(bounds) = bounds else {
        return true;
    };
    let Ok(n) = value.parse::<f64>() else {
        return false;
    };
    let above_min = bounds.min_number().map_or(true, |min| n >= min);
    let below_max = bounds.max_number().map_or(true, |max| n <= max);
    above_min && below_max
}
