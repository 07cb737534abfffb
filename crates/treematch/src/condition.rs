//! Scalar predicates for `compare` patterns.
//!
//! A [`Condition`] represents a single test on a scalar: an operator and an
//! operand. Operator and operand are checked against each other when the
//! condition is built, so evaluation never fails.

use std::fmt;

use regex::Regex;

use crate::error::{PatternError, Result};
use crate::node::Scalar;
use crate::op::Op;

/// A single scalar predicate.
///
/// # Example
///
/// ```
/// use treematch::{Condition, Op, Scalar};
///
/// let cond = Condition::new(Op::Gte, 10i64).unwrap();
/// assert!(cond.matches(&Scalar::from(12u8)));
/// assert!(!cond.matches(&Scalar::from("12")));
///
/// assert!(Condition::new(Op::StartsWith, 10i64).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Condition {
    op: Op,
    operand: Operand,
}

/// Owned right-hand side of a [`Condition`].
#[derive(Debug, Clone)]
pub enum Operand {
    /// Single scalar.
    Scalar(Scalar),
    /// Set of scalars (for `In`).
    Set(Vec<Scalar>),
    /// Compiled regular expression (for `Regex`).
    Regex(Regex),
}

impl Condition {
    /// Creates a condition comparing against a scalar operand.
    ///
    /// Ordering operators accept any scalar; string operators need a string.
    /// `Regex` and `In` have their own constructors.
    pub fn new(op: Op, operand: impl Into<Scalar>) -> Result<Self> {
        let operand = operand.into();
        let valid = op.is_ordering_op() || (op.is_string_op() && operand.as_str().is_some());
        if !valid {
            return Err(PatternError::InvalidOperator {
                op: op.as_str(),
                operand: operand_kind(&operand),
            });
        }
        Ok(Condition {
            op,
            operand: Operand::Scalar(operand),
        })
    }

    /// Creates a condition matching strings against a regular expression.
    pub fn regex(pattern: &str) -> Result<Self> {
        Ok(Condition {
            op: Op::Regex,
            operand: Operand::Regex(Regex::new(pattern)?),
        })
    }

    /// Creates a set-membership condition.
    pub fn one_of<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Condition {
            op: Op::In,
            operand: Operand::Set(values.into_iter().map(Into::into).collect()),
        }
    }

    /// The condition's operator.
    pub fn op(&self) -> Op {
        self.op
    }

    /// The condition's operand.
    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Evaluates this condition against a scalar.
    ///
    /// Returns `false` when the kinds are incompatible (a string is never
    /// greater than a number), including for `Ne`.
    pub fn matches(&self, scalar: &Scalar) -> bool {
        match &self.operand {
            Operand::Regex(regex) => scalar.as_str().is_some_and(|s| regex.is_match(s)),
            Operand::Set(set) => set.contains(scalar),
            Operand::Scalar(operand) => match self.op {
                Op::StartsWith | Op::EndsWith | Op::Contains => {
                    match (scalar.as_str(), operand.as_str()) {
                        (Some(s), Some(pattern)) => self.match_string(s, pattern),
                        _ => false,
                    }
                }
                op => scalar
                    .compare(operand)
                    .is_some_and(|ordering| op.eval_ordering(ordering)),
            },
        }
    }

    fn match_string(&self, field: &str, pattern: &str) -> bool {
        match self.op {
            Op::StartsWith => field.starts_with(pattern),
            Op::EndsWith => field.ends_with(pattern),
            Op::Contains => field.contains(pattern),
            _ => false,
        }
    }
}

fn operand_kind(scalar: &Scalar) -> &'static str {
    match scalar {
        Scalar::Bool(_) => "bool",
        Scalar::Number(_) => "number",
        Scalar::Str(_) => "string",
        Scalar::Bytes(_) => "bytes",
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            Operand::Scalar(scalar) => write!(f, "{} {}", self.op, scalar),
            Operand::Regex(regex) => write!(f, "{} /{}/", self.op, regex.as_str()),
            Operand::Set(set) => {
                write!(f, "{} [", self.op)?;
                for (i, scalar) in set.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", scalar)?;
                }
                f.write_str("]")
            }
        }
    }
}
