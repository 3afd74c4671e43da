//! Selector operators.
//!
//! The [`Operator`] enum is closed: every requirement carries exactly one of
//! these variants, and each variant pairs with an [`Arity`] rule that the
//! requirement's values must satisfy.

use std::cmp::Ordering;

/// Comparison operator of a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    /// Key is present (bare key).
    Exists,
    /// Key is absent (`!key`).
    DoesNotExist,
    /// Value equals the operand (`=`).
    Equals,
    /// Key absent or value differs from the operand (`!=`).
    NotEquals,
    /// Integer value greater than the operand (`>`).
    GreaterThan,
    /// Integer value less than the operand (`<`).
    LessThan,
    /// Value is one of the operands (`in`).
    In,
    /// Key absent or value is none of the operands (`notin`).
    NotIn,
    /// Value matches the pattern from its first character (`re`).
    Regex,
}

/// How many values an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No values.
    None,
    /// Exactly one value.
    One,
    /// One or more values.
    AtLeastOne,
}

impl Arity {
    /// Returns `true` if `count` values satisfy this rule.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::None => count == 0,
            Arity::One => count == 1,
            Arity::AtLeastOne => count >= 1,
        }
    }
}

const ARITY: [(Operator, Arity); 9] = [
    (Operator::Exists, Arity::None),
    (Operator::DoesNotExist, Arity::None),
    (Operator::Equals, Arity::One),
    (Operator::NotEquals, Arity::One),
    (Operator::GreaterThan, Arity::One),
    (Operator::LessThan, Arity::One),
    (Operator::In, Arity::AtLeastOne),
    (Operator::NotIn, Arity::AtLeastOne),
    (Operator::Regex, Arity::One),
];

impl Operator {
    /// Returns the value-count rule for this operator.
    pub fn arity(self) -> Arity {
        ARITY
            .iter()
            .find(|(op, _)| *op == self)
            .map(|(_, arity)| *arity)
            .unwrap_or(Arity::None)
    }

    /// Returns `true` for `>` and `<`, whose values must be integers.
    pub fn is_numeric(self) -> bool {
        matches!(self, Operator::GreaterThan | Operator::LessThan)
    }

    /// Returns `true` for operators that also match when the key is absent.
    pub fn matches_absent(self) -> bool {
        matches!(
            self,
            Operator::DoesNotExist | Operator::NotEquals | Operator::NotIn
        )
    }

    /// Evaluates a numeric comparison given `candidate.cmp(operand)`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Operator::GreaterThan => ordering == Ordering::Greater,
            Operator::LessThan => ordering == Ordering::Less,
            _ => false,
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Exists => "exists",
            Operator::DoesNotExist => "!",
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::GreaterThan => "gt",
            Operator::LessThan => "lt",
            Operator::In => "in",
            Operator::NotIn => "notin",
            Operator::Regex => "re",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
