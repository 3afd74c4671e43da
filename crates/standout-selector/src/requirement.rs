//! Requirement: a single key/operator/values condition.

use num_bigint::BigInt;
use regex::Regex;

use crate::error::{Result, SelectorError};
use crate::labels::Labels;
use crate::op::{Arity, Operator};
use crate::set::OrderedSet;

/// One atomic condition of a selector.
///
/// A requirement consists of:
/// - A key (the label to look up)
/// - An operator (how to compare)
/// - A set of values (what to compare against)
///
/// Requirements are validated when built and never change afterwards.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use standout_selector::{Operator, Requirement};
///
/// let requirement = Requirement::new("tier", Operator::In, ["gold", "silver"]).unwrap();
/// let labels = HashMap::from([("tier", "gold")]);
/// assert!(requirement.matches(&labels));
/// ```
#[derive(Debug, Clone)]
pub struct Requirement {
    key: String,
    operator: Operator,
    values: OrderedSet,
    compiled: Compiled,
}

/// Operand prepared at construction so matching never re-parses it.
#[derive(Debug, Clone)]
enum Compiled {
    None,
    Integer(BigInt),
    Pattern(Regex),
}

impl Requirement {
    /// Creates a requirement, checking that the values fit the operator.
    ///
    /// Fails with [`SelectorError::Validation`] when the value count is
    /// wrong for the operator or a `>`/`<` operand is not an integer, and
    /// with [`SelectorError::InvalidRegex`] when a `re` pattern does not
    /// compile.
    pub fn new<I, S>(key: impl Into<String>, operator: Operator, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: OrderedSet = values.into_iter().collect();
        let arity = operator.arity();
        if !arity.accepts(values.len()) {
            let reason = match arity {
                Arity::None => "values set must be empty".to_string(),
                Arity::One => format!("exactly one value is required, got {}", values.len()),
                Arity::AtLeastOne => "values set can't be empty".to_string(),
            };
            return Err(SelectorError::validation(operator, reason));
        }

        let compiled = match operator {
            Operator::GreaterThan | Operator::LessThan => {
                let value = values.first().unwrap_or_default();
                let bound = value.parse::<BigInt>().map_err(|_| {
                    SelectorError::validation(
                        operator,
                        format!("value '{value}' is not an integer"),
                    )
                })?;
                Compiled::Integer(bound)
            }
            Operator::Regex => {
                let pattern = values.first().unwrap_or_default();
                Compiled::Pattern(Regex::new(&format!("^(?:{pattern})"))?)
            }
            _ => Compiled::None,
        };

        Ok(Requirement {
            key: key.into(),
            operator,
            values,
            compiled,
        })
    }

    /// Returns the label key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the operand values in the order they were written.
    pub fn values(&self) -> &OrderedSet {
        &self.values
    }

    /// Evaluates this requirement against a set of labels.
    ///
    /// A `>` or `<` requirement does not match a label whose value is not
    /// an integer. Use [`Requirement::try_matches`] to get an error instead.
    pub fn matches<L: Labels + ?Sized>(&self, labels: &L) -> bool {
        match self.try_matches(labels) {
            Ok(matched) => matched,
            Err(err) => {
                log::debug!("requirement on '{}' does not match: {err}", self.key);
                false
            }
        }
    }

    /// Evaluates this requirement, failing with
    /// [`SelectorError::NonIntegerLabel`] when a numeric comparison meets a
    /// value that is not an integer.
    pub fn try_matches<L: Labels + ?Sized>(&self, labels: &L) -> Result<bool> {
        let Some(value) = labels.label(&self.key) else {
            return Ok(self.operator.matches_absent());
        };

        let matched = match self.operator {
            Operator::Exists => true,
            Operator::DoesNotExist => false,
            Operator::Equals | Operator::In => self.values.contains(value),
            Operator::NotEquals | Operator::NotIn => !self.values.contains(value),
            Operator::Regex => match &self.compiled {
                Compiled::Pattern(regex) => regex.is_match(value),
                _ => false,
            },
            Operator::GreaterThan | Operator::LessThan => {
                let Compiled::Integer(bound) = &self.compiled else {
                    return Ok(false);
                };
                let candidate =
                    value
                        .parse::<BigInt>()
                        .map_err(|_| SelectorError::NonIntegerLabel {
                            key: self.key.clone(),
                            value: value.to_string(),
                            operator: self.operator,
                        })?;
                self.operator.eval_ordering(candidate.cmp(bound))
            }
        };
        Ok(matched)
    }
}

impl PartialEq for Requirement {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.operator == other.operator && self.values == other.values
    }
}

impl Eq for Requirement {}
