//! # Message Synthesis
//!
//! Turns a failed rule into the text shown next to the field. The label
//! always leads the message. Every rule id produces a message; ids with
//! no dedicated wording fall back to `"{label} is Invalid"`.
//!
//! Range-style wording (`int`, `length`) only uses bounds that are valid
//! integers. A bound such as `1.5` or `"abc"` counts as not set, so the
//! message degrades to the next applicable branch.

use formcheck_core::RuleOptions;

/// Build the failure message for `rule_id` on a field labelled `label`.
pub fn synthesize(rule_id: &str, label: &str, options: &RuleOptions) -> String {
    match rule_id {
        "required" => format!("{label} is Required"),
        "email" => format!("{label} should be a valid Email Address"),
        "in" => {
            let allowed = options.display_text().unwrap_or_default();
            format!("{label} should be one of {allowed}")
        }
        "numeric" => format!("{label} should only contain numbers"),
        "int" => {
            let bounds = options.bounds();
            let min = bounds.and_then(|b| b.min_int());
            let max = bounds.and_then(|b| b.max_int());
            match (min, max) {
                (Some(min), Some(max)) => format!("{label} should be between {min} and {max}"),
                (Some(min), None) => format!("{label} should be at least {min}"),
                (None, Some(max)) => format!("{label} should be at most {max}"),
                (None, None) => format!("{label} should be an Number"),
            }
        }
        "date" => format!("{label} should be a Date"),
        "before" | "after" => match options.display_text().filter(|t| !t.is_empty()) {
            Some(point) => format!("{label} should be {rule_id} {point}"),
            None => format!("{label} should be {rule_id} Current Time"),
        },
        "length" => {
            let bounds = options.bounds();
            let min = bounds.and_then(|b| b.min_int());
            let max = bounds.and_then(|b| b.max_int());
            match (min, max) {
                (Some(min), Some(max)) => format!(
                    "{label} should be a minimum of {min} and a maximum of {max} characters"
                ),
                (Some(min), None) => format!("{label} should be a minimum of {min} characters"),
                (None, Some(max)) => format!("{label} should be a maximum of {max} characters"),
                (None, None) => format!("{label} is an Invalid length"),
            }
        }
        "URL" | "url" => format!("{label} should be a valid URL"),
        _ => format!("{label} is Invalid"),
    }
}
