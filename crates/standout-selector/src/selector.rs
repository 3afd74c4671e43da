//! Selector: a conjunction of requirements.
//!
//! A [`Selector`] is built once, usually by [`parse`](crate::parse), and
//! then evaluated against any number of label maps. It never changes after
//! construction, so one selector can be shared across threads freely.

use std::str::FromStr;

use crate::error::{Result, SelectorError};
use crate::labels::Labels;
use crate::parser::Parser;
use crate::requirement::Requirement;

/// A set of requirements that must all match.
///
/// Requirements are kept sorted by key (stable for equal keys), so two
/// selectors written with their requirements in a different order compare
/// equal.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use standout_selector::Selector;
///
/// let selector: Selector = "env in (prod, staging), !canary".parse().unwrap();
///
/// let pods = vec![
///     HashMap::from([("env", "prod")]),
///     HashMap::from([("env", "prod"), ("canary", "true")]),
///     HashMap::from([("env", "dev")]),
/// ];
///
/// assert_eq!(selector.count(&pods), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    requirements: Vec<Requirement>,
}

impl Selector {
    /// Parses selector text.
    pub fn parse(text: &str) -> Result<Self> {
        let requirements = Parser::new(text)?.parse()?;
        log::debug!(
            "parsed selector '{text}' into {} requirement(s)",
            requirements.len()
        );
        Ok(Selector::new(requirements))
    }

    /// Creates a selector from already validated requirements.
    pub fn new(requirements: impl IntoIterator<Item = Requirement>) -> Self {
        let mut requirements: Vec<Requirement> = requirements.into_iter().collect();
        requirements.sort_by(|a, b| a.key().cmp(b.key()));
        Selector { requirements }
    }

    /// Creates a selector with no requirements, which matches everything.
    pub fn everything() -> Self {
        Selector::default()
    }

    /// Returns the requirements, sorted by key.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Returns the number of requirements.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Returns `true` if this selector has no requirements (matches everything).
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Tests if a label map satisfies every requirement.
    ///
    /// Stops at the first requirement that fails. A `>` or `<` requirement
    /// against a non-integer label counts as a failure.
    pub fn matches<L: Labels + ?Sized>(&self, labels: &L) -> bool {
        self.requirements
            .iter()
            .all(|requirement| requirement.matches(labels))
    }

    /// Like [`Selector::matches`], but a numeric comparison against a
    /// non-integer label aborts with [`SelectorError::NonIntegerLabel`].
    pub fn try_matches<L: Labels + ?Sized>(&self, labels: &L) -> Result<bool> {
        for requirement in &self.requirements {
            if !requirement.try_matches(labels)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns references to the matching items, in their original order.
    pub fn filter<'a, L: Labels>(&self, items: &'a [L]) -> Vec<&'a L> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }

    /// Counts the number of matching items.
    pub fn count<L: Labels>(&self, items: &[L]) -> usize {
        items.iter().filter(|item| self.matches(*item)).count()
    }

    /// Returns `true` if any item matches.
    pub fn any<L: Labels>(&self, items: &[L]) -> bool {
        items.iter().any(|item| self.matches(item))
    }

    /// Returns `true` if all items match.
    pub fn all<L: Labels>(&self, items: &[L]) -> bool {
        items.iter().all(|item| self.matches(item))
    }

    /// Finds the first matching item.
    pub fn find<'a, L: Labels>(&self, items: &'a [L]) -> Option<&'a L> {
        items.iter().find(|item| self.matches(*item))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self> {
        Selector::parse(s)
    }
}

impl TryFrom<&str> for Selector {
    type Error = SelectorError;

    fn try_from(s: &str) -> Result<Self> {
        Selector::parse(s)
    }
}
