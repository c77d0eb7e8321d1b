//! # formcheck-core - Foundational Types for formcheck
//!
//! Defines the data every other formcheck crate exchanges: what a form
//! submitted, what a rule was declared with, and the errors raised when
//! an input cannot be interpreted at all.
//!
//! ## Key Design Principles
//!
//! 1. **One textual coercion.** Every check sees a value through
//!    [`FieldValue::to_text`]. Presence is "textual form is non-empty", so
//!    `0`, `"0"` and `false` are values, not absences.
//!
//! 2. **Options keep their raw shape.** [`RuleOptions`] stores bounds as
//!    submitted; whether a bound is a usable integer is decided at the
//!    point of use, so malformed options degrade instead of failing.
//!
//! 3. **Lenient dates.** [`temporal::parse_date`] accepts the layouts real
//!    forms produce and normalizes them to UTC.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `formcheck-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod options;
pub mod submission;
pub mod temporal;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::FormcheckError;
pub use options::{is_integer_text, Bounds, RuleOptions};
pub use submission::Submission;
pub use temporal::{format_date, parse_date};
pub use value::FieldValue;
