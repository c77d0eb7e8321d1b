//! # Temporal Parsing - Lenient Date Recognition
//!
//! Form inputs carry dates in whatever layout the client produced: ISO
//! 8601 from `<input type="date">`, RFC 2822 from mail-style headers, or
//! the browser's `Date.prototype.toString()` output. This module turns
//! any of those into a UTC instant so the `date`, `before` and `after`
//! predicates compare like with like.
//!
//! Date-only layouts resolve to midnight UTC. Offsets are honored and
//! converted, never discarded.
//!
//! The canonical textual form of a date value is RFC 3339 with seconds
//! precision and a `Z` suffix (see [`format_date`]).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Naive date-time layouts, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

/// Date-only layouts, interpreted as midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Browser `Date.toString()` layout once the trailing zone name is removed,
/// e.g. `Fri Apr 24 1987 00:00:00 GMT+1000`.
const BROWSER_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Parse a date in any of the accepted layouts.
///
/// Returns `None` when the text is not recognizable as a date. Sub-second
/// precision is discarded.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(truncate_to_seconds(dt.with_timezone(&Utc)));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(truncate_to_seconds(dt.with_timezone(&Utc)));
    }

    if let Some(dt) = parse_browser_date(text) {
        return Some(dt);
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

/// Render a date as RFC 3339 with `Z` suffix (e.g. `2026-01-15T12:00:00Z`).
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn parse_browser_date(text: &str) -> Option<DateTime<Utc>> {
    // "(Australian Eastern Standard Time)" is informational only.
    let without_zone_name = match text.find(" (") {
        Some(idx) if text.ends_with(')') => &text[..idx],
        _ => text,
    };
    DateTime::parse_from_str(without_zone_name, BROWSER_FORMAT)
        .ok()
        .map(|dt| truncate_to_seconds(dt.with_timezone(&Utc)))
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_parse_rfc3339_z() {
        assert_eq!(
            parse_date("2026-01-15T12:00:00Z"),
            Some(utc(2026, 1, 15, 12, 0, 0))
        );
    }

    #[test]
    fn test_parse_rfc3339_converts_offset() {
        assert_eq!(
            parse_date("2026-01-15T17:00:00+05:00"),
            Some(utc(2026, 1, 15, 12, 0, 0))
        );
    }

    #[test]
    fn test_parse_subseconds_truncated() {
        let dt = parse_date("2026-01-15T12:00:00.123456Z").unwrap();
        assert_eq!(dt.nanosecond(), 0);
    }

    #[test]
    fn test_parse_rfc2822() {
        assert_eq!(
            parse_date("Thu, 15 Jan 2026 12:00:00 +0000"),
            Some(utc(2026, 1, 15, 12, 0, 0))
        );
    }

    #[test]
    fn test_parse_date_only_layouts() {
        let midnight = utc(1987, 4, 24, 0, 0, 0);
        assert_eq!(parse_date("1987-04-24"), Some(midnight));
        assert_eq!(parse_date("1987/04/24"), Some(midnight));
        assert_eq!(parse_date("04/24/1987"), Some(midnight));
    }

    #[test]
    fn test_parse_naive_datetime() {
        assert_eq!(
            parse_date("2026-01-15 08:30:00"),
            Some(utc(2026, 1, 15, 8, 30, 0))
        );
    }

    #[test]
    fn test_parse_browser_to_string() {
        assert_eq!(
            parse_date("Fri Apr 24 1987 00:00:00 GMT+1000 (Australian Eastern Standard Time)"),
            Some(utc(1987, 4, 23, 14, 0, 0))
        );
        assert_eq!(
            parse_date("Fri Apr 24 1987 00:00:00 GMT+0000"),
            Some(utc(1987, 4, 24, 0, 0, 0))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2026-13-45"), None);
        assert_eq!(parse_date("42"), None);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&utc(2026, 1, 1, 0, 0, 0)), "2026-01-01T00:00:00Z");
    }

    #[test]
    fn test_format_then_parse_is_stable() {
        let dt = utc(2026, 6, 30, 23, 59, 59);
        assert_eq!(parse_date(&format_date(&dt)), Some(dt));
    }
}
