//! Comparison operators for scalar conditions.
//!
//! The [`Op`] enum defines all supported comparison operators, organized by
//! the operands they apply to. Not all operators are valid for all operands.

use std::cmp::Ordering;

/// Comparison operator for a [`Condition`](crate::Condition).
///
/// Operators are grouped by the operands they support:
/// - **Ordering**: `Eq`, `Ne`, `Gt`, `Gte`, `Lt`, `Lte` - any scalar operand
/// - **String**: `StartsWith`, `EndsWith`, `Contains` - string operands
/// - **Pattern**: `Regex` - built with [`Condition::regex`](crate::Condition::regex)
/// - **Set**: `In` - built with [`Condition::one_of`](crate::Condition::one_of)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,

    /// String starts with prefix.
    StartsWith,
    /// String ends with suffix.
    EndsWith,
    /// String contains substring.
    Contains,
    /// String matches regular expression.
    Regex,

    /// Value is one of the given set.
    In,
}

impl Op {
    /// Returns `true` if this operator compares by scalar ordering.
    pub fn is_ordering_op(self) -> bool {
        matches!(self, Op::Eq | Op::Ne | Op::Gt | Op::Gte | Op::Lt | Op::Lte)
    }

    /// Returns `true` if this operator needs a string operand.
    pub fn is_string_op(self) -> bool {
        matches!(self, Op::StartsWith | Op::EndsWith | Op::Contains)
    }

    /// Evaluates a comparison given an ordering result.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::StartsWith => "startswith",
            Op::EndsWith => "endswith",
            Op::Contains => "contains",
            Op::Regex => "regex",
            Op::In => "in",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_groups() {
        assert!(Op::Eq.is_ordering_op());
        assert!(Op::Lte.is_ordering_op());
        assert!(!Op::Contains.is_ordering_op());
        assert!(!Op::In.is_ordering_op());

        assert!(Op::StartsWith.is_string_op());
        assert!(Op::Contains.is_string_op());
        assert!(!Op::Regex.is_string_op());
        assert!(!Op::Eq.is_string_op());
    }

    #[test]
    fn op_eval_ordering() {
        assert!(Op::Eq.eval_ordering(Ordering::Equal));
        assert!(!Op::Eq.eval_ordering(Ordering::Less));

        assert!(!Op::Ne.eval_ordering(Ordering::Equal));
        assert!(Op::Ne.eval_ordering(Ordering::Greater));

        assert!(Op::Gt.eval_ordering(Ordering::Greater));
        assert!(!Op::Gt.eval_ordering(Ordering::Equal));

        assert!(Op::Gte.eval_ordering(Ordering::Equal));
        assert!(!Op::Gte.eval_ordering(Ordering::Less));

        assert!(Op::Lt.eval_ordering(Ordering::Less));
        assert!(!Op::Lt.eval_ordering(Ordering::Greater));

        assert!(Op::Lte.eval_ordering(Ordering::Equal));
        assert!(!Op::Lte.eval_ordering(Ordering::Greater));

        assert!(!Op::Contains.eval_ordering(Ordering::Equal));
    }

    #[test]
    fn op_display() {
        assert_eq!(Op::Eq.to_string(), "eq");
        assert_eq!(Op::StartsWith.to_string(), "startswith");
        assert_eq!(Op::In.to_string(), "in");
    }
}
