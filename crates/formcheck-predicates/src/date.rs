//! Date predicates. Both the value and the comparison point go through
//! [`formcheck_core::parse_date`]; a comparison rule with no option
//! compares against the current time.

use chrono::{DateTime, Utc};
use formcheck_core::{parse_date, RuleOptions};

/// Recognizable as a date.
pub fn is_date(value: &str, _options: &RuleOptions) -> bool {
    parse_date(value).is_some()
}

/// Strictly earlier than the comparison date (default: now).
pub fn is_before(value: &str, options: &RuleOptions) -> bool {
    match (parse_date(value), comparison_point(options)) {
        (Some(value), Some(point)) => value < point,
        _ => false,
    }
}

/// Strictly later than the comparison date (default: now).
pub fn is_after(value: &str, options: &RuleOptions) -> bool {
    match (parse_date(value), comparison_point(options)) {
        (Some(value), Some(point)) => value > point,
        _ => false,
    }
}

/// The instant a before/after rule compares against. Options that are not
/// a recognizable date yield `None`, failing the rule.
fn comparison_point(options: &RuleOptions) -> Option<DateTime<Utc>> {
    match options {
        RuleOptions::None => Some(Utc::now()),
        RuleOptions::Scalar(v) => parse_date(&v.to_text()),
        RuleOptions::Range(_) | RuleOptions::List(_) => None,
    }
}
