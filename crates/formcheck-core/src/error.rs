//! # Error Types
//!
//! Errors shared by every formcheck crate. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - A failed field check is never an error: it becomes a message in the
//!   error map returned by validation.
//! - Errors here describe inputs the engine cannot interpret at all
//!   (structured values where a primitive is expected, unknown fields,
//!   malformed configuration).

use thiserror::Error;

/// Top-level error type for formcheck.
#[derive(Error, Debug)]
pub enum FormcheckError {
    /// A submitted value is not a primitive (string, number, boolean, date).
    #[error("unsupported value for field '{field}': {kind} values cannot be validated")]
    UnsupportedValue {
        /// The field carrying the value.
        field: String,
        /// JSON kind of the offending value (e.g. "array", "object").
        kind: &'static str,
    },

    /// The submission as a whole has the wrong shape.
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    /// A field name was referenced that the schema does not define.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// Engine configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}
