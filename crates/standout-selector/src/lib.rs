//! Selector - Label selector parsing and matching for key/value maps.
//!
//! A selector is a comma-separated list of requirements over string labels.
//! It is parsed once into an immutable [`Selector`] and then evaluated
//! against any number of label maps.
//!
//! # Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use standout_selector::parse;
//!
//! let selector = parse("app=web, tier in (frontend, edge), !deprecated, replicas>1").unwrap();
//!
//! let labels = HashMap::from([
//!     ("app", "web"),
//!     ("tier", "edge"),
//!     ("replicas", "3"),
//! ]);
//! assert!(selector.matches(&labels));
//! ```
//!
//! # Syntax
//!
//! | Requirement | Matches when |
//! |-------------|--------------|
//! | `key` | `key` is present |
//! | `!key` | `key` is absent |
//! | `key=v` | `key` is present and equals `v` |
//! | `key!=v` | `key` is absent or differs from `v` |
//! | `key>n`, `key<n` | `key` is present and its integer value compares |
//! | `key in (a, b)` | `key` is present and is one of the values |
//! | `key notin (a, b)` | `key` is absent or is none of the values |
//! | `key re pattern` | `key` is present and `pattern` matches from its start |
//!
//! Requirements are joined by `,` and must all match. An empty selector
//! matches everything. Whitespace separates tokens; identifiers cannot
//! contain whitespace or any of `= ! ( ) , > <`.
//!
//! # Errors
//!
//! Parsing stops at the first problem and returns a [`SelectorError`]:
//! lexical, syntax, or validation (wrong value count, non-integer operand,
//! bad pattern). No partial selector is ever returned.
//!
//! Matching through [`Selector::matches`] never fails: a `>`/`<` comparison
//! against a label that is not an integer simply does not match.
//! [`Selector::try_matches`] reports that case as an error instead.

mod error;
mod labels;
mod lexer;
mod op;
mod parser;
mod requirement;
mod selector;
mod set;

// Re-export public API
pub use error::{Result, SelectorError};
pub use labels::Labels;
pub use op::{Arity, Operator};
pub use requirement::Requirement;
pub use selector::Selector;
pub use set::OrderedSet;

/// Parses selector text into a [`Selector`].
///
/// ```
/// use standout_selector::parse;
///
/// assert!(parse("x in (a, b)").is_ok());
/// assert!(parse("x in (").is_err());
/// ```
pub fn parse(text: &str) -> Result<Selector> {
    Selector::parse(text)
}
