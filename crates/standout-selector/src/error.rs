//! Error types for the selector crate.

use thiserror::Error;

use crate::op::Operator;

/// Errors that can occur when parsing selectors or evaluating them.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// A run of symbol characters that forms no known symbol.
    #[error("lexical error at offset {offset}: no symbol matches '{buffer}'")]
    Lexical { buffer: String, offset: usize },

    /// A token appeared where the grammar does not allow it.
    #[error("syntax error at offset {offset}: found '{found}', expected: {expected}")]
    Syntax {
        found: String,
        expected: &'static str,
        offset: usize,
    },

    /// The operator and its values do not fit together.
    #[error("invalid requirement for '{operator}' operator: {reason}")]
    Validation { operator: Operator, reason: String },

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// A candidate value could not be compared numerically.
    #[error("label '{key}' has non-integer value '{value}' for '{operator}' comparison")]
    NonIntegerLabel {
        key: String,
        value: String,
        operator: Operator,
    },
}

impl SelectorError {
    pub(crate) fn syntax(found: &str, expected: &'static str, offset: usize) -> Self {
        SelectorError::Syntax {
            found: found.to_string(),
            expected,
            offset,
        }
    }

    pub(crate) fn validation(operator: Operator, reason: impl Into<String>) -> Self {
        SelectorError::Validation {
            operator,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error was raised while parsing selector text
    /// or building a requirement, as opposed to while matching.
    pub fn is_parse_error(&self) -> bool {
        !matches!(self, SelectorError::NonIntegerLabel { .. })
    }
}

/// Result type for selector operations.
pub type Result<T> = std::result::Result<T, SelectorError>;
