//! Error types for the treematch crate.
//!
//! Only pattern construction can fail. A pattern that does not hold at some
//! position is a normal outcome of matching and is never reported as an error.

use thiserror::Error;

/// Errors that can occur when building patterns or conditions.
#[derive(Debug, Error)]
pub enum PatternError {
    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Operator is not valid for the given operand.
    #[error("operator '{op}' is not valid for {operand} operands")]
    InvalidOperator {
        op: &'static str,
        operand: &'static str,
    },

    /// A type pattern was given too many arguments.
    #[error("type pattern takes between one and four arguments, got {given}")]
    TypeArity { given: usize },

    /// A structural step slot of a type pattern holds a non-structural pattern.
    #[error("step {slot} of a type pattern must be a mapping or sequence pattern, not {found}")]
    NotStructural { slot: usize, found: &'static str },

    /// Ancestor distance of zero.
    #[error("ancestor depth must be at least 1")]
    InvalidDepth,
}

/// Result type for treematch operations.
pub type Result<T> = std::result::Result<T, PatternError>;
