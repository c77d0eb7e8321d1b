//! # formcheck-predicates - The Predicate Library
//!
//! Named boolean checks over a submitted value's textual form: formats
//! (email, URL, UUID, card numbers), numbers with optional ranges, text
//! length and membership, and dates.
//!
//! The [`PredicateLibrary`] registry maps rule ids to these functions.
//! Lookups normalize the id ([`rule_key`]) so `creditCard` and
//! `credit-card` are the same rule, and unknown ids come back as `None`
//! rather than a panic.
//!
//! ## Calling Convention
//!
//! Every predicate has the shape `fn(&str, &RuleOptions) -> bool`. Range
//! rules (`int`, `float`, `length`) read `{ min, max }` bounds from the
//! options; `length` counts characters between those bounds.
//!
//! ## Crate Policy
//!
//! - Depends only on `formcheck-core` internally.
//! - Predicates are pure and total: malformed input or options produce
//!   `false`, never a panic.

pub mod date;
pub mod library;
pub mod number;
pub mod text;

pub use library::{rule_key, Predicate, PredicateLibrary};
