//! Format and comparison predicates over a value's textual form.

use formcheck_core::{FieldValue, RuleOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use url::{Host, Url};

static EMAIL_LOCAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("email local-part pattern compiles")
});

/// Accepted URL schemes.
const URL_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Email address with a dotted domain and an alphabetic top-level label.
pub fn is_email(value: &str, _options: &RuleOptions) -> bool {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || !EMAIL_LOCAL.is_match(local) {
        return false;
    }
    is_fqdn(domain)
}

/// HTTP(S)/FTP URL. The scheme may be omitted (`example.com/path`); the
/// host must be a fully qualified domain name or an IP address.
pub fn is_url(value: &str, _options: &RuleOptions) -> bool {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    let candidate = if value.contains("://") {
        value.to_string()
    } else {
        format!("http://{value}")
    };
    let Ok(url) = Url::parse(&candidate) else {
        return false;
    };
    if !URL_SCHEMES.contains(&url.scheme()) {
        return false;
    }
    match url.host() {
        Some(Host::Domain(domain)) => is_fqdn(domain),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

/// Letters only (ASCII).
pub fn is_alpha(value: &str, _options: &RuleOptions) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
}

/// Letters and digits only (ASCII).
pub fn is_alphanumeric(value: &str, _options: &RuleOptions) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// ASCII characters only.
pub fn is_ascii(value: &str, _options: &RuleOptions) -> bool {
    !value.is_empty() && value.is_ascii()
}

/// No uppercase characters.
pub fn is_lowercase(value: &str, _options: &RuleOptions) -> bool {
    value == value.to_lowercase()
}

/// No lowercase characters.
pub fn is_uppercase(value: &str, _options: &RuleOptions) -> bool {
    value == value.to_uppercase()
}

/// Hex digits only.
pub fn is_hexadecimal(value: &str, _options: &RuleOptions) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// `#rgb` or `#rrggbb`, the `#` optional.
pub fn is_hex_color(value: &str, _options: &RuleOptions) -> bool {
    let digits = value.strip_prefix('#').unwrap_or(value);
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Card number of 13 to 19 digits passing the Luhn checksum. Spaces and
/// dashes between digit groups are ignored.
pub fn is_credit_card(value: &str, _options: &RuleOptions) -> bool {
    let mut digits = Vec::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ' ' | '-' => continue,
            _ => match c.to_digit(10) {
                Some(d) => digits.push(d),
                None => return false,
            },
        }
    }
    if !(13..=19).contains(&digits.len()) {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// Hyphenated UUID (`xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`).
pub fn is_uuid(value: &str, _options: &RuleOptions) -> bool {
    value.len() == 36 && uuid::Uuid::parse_str(value).is_ok()
}

/// A JSON object or array.
pub fn is_json(value: &str, _options: &RuleOptions) -> bool {
    matches!(
        serde_json::from_str::<serde_json::Value>(value),
        Ok(serde_json::Value::Object(_)) | Ok(serde_json::Value::Array(_))
    )
}

/// `true`, `false`, `1` or `0`.
pub fn is_boolean(value: &str, _options: &RuleOptions) -> bool {
    matches!(value, "true" | "false" | "1" | "0")
}

/// Character count within `{ min, max }`. A missing minimum is 0; a
/// missing maximum is unbounded.
pub fn is_length(value: &str, options: &RuleOptions) -> bool {
    let (min, max) = match options.bounds() {
        Some(b) => (b.min_number().unwrap_or(0.0), b.max_number()),
        None => (0.0, None),
    };
    let len = value.chars().count() as f64;
    len >= min && max.map_or(true, |max| len <= max)
}

/// Textual membership in a list of allowed values.
pub fn is_in(value: &str, options: &RuleOptions) -> bool {
    match options {
        RuleOptions::List(items) => items.iter().any(|item| item.to_text() == value),
        RuleOptions::Scalar(item) => item.to_text() == value,
        RuleOptions::None | RuleOptions::Range(_) => false,
    }
}

/// Exact textual equality with the comparison value.
pub fn equals(value: &str, options: &RuleOptions) -> bool {
    options
        .as_scalar()
        .map(FieldValue::to_text)
        .is_some_and(|expected| expected == value)
}

/// Contains the comparison value as a substring.
pub fn contains(value: &str, options: &RuleOptions) -> bool {
    options
        .as_scalar()
        .map(FieldValue::to_text)
        .is_some_and(|seed| value.contains(&seed))
}

/// Dotted domain name whose last label is alphabetic and at least two
/// characters long.
fn is_fqdn(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if domain.is_empty() || domain.len() > 253 {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let valid_labels = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    });
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic));
    valid_labels && tld_ok
}
