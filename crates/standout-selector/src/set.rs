//! Insertion-ordered, deduplicating string set.

use indexmap::IndexSet;

/// Set of requirement values that remembers the order values were first
/// inserted in.
///
/// Matching only uses membership; the order is kept so requirement values
/// and error messages come out the way they were written.
///
/// ```
/// use standout_selector::OrderedSet;
///
/// let set: OrderedSet = ["a", "b", "a"].into_iter().collect();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.iter().collect::<Vec<_>>(), ["a", "b"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderedSet {
    items: IndexSet<String>,
}

impl OrderedSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        OrderedSet::default()
    }

    /// Inserts a value, returning `false` if it was already present.
    ///
    /// A repeated value keeps its original position.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        self.items.insert(value.into())
    }

    /// Returns `true` if the set contains `value`.
    pub fn contains(&self, value: &str) -> bool {
        self.items.contains(value)
    }

    /// Returns the number of distinct values.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the value at `index` in insertion order.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get_index(index).map(String::as_str)
    }

    /// Returns the first inserted value.
    pub fn first(&self) -> Option<&str> {
        self.get(0)
    }

    /// Iterates values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(String::as_str)
    }
}

// Order-sensitive, unlike `IndexSet`'s own equality.
impl PartialEq for OrderedSet {
    fn eq(&self, other: &Self) -> bool {
        self.items.iter().eq(other.items.iter())
    }
}

impl Eq for OrderedSet {}

impl<S: Into<String>> FromIterator<S> for OrderedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for OrderedSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl IntoIterator for OrderedSet {
    type Item = String;
    type IntoIter = indexmap::set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedSet {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_deduplicates_and_keeps_first_position() {
        let mut set = OrderedSet::new();
        assert!(set.insert("b"));
        assert!(set.insert("a"));
        assert!(!set.insert("b"));
        assert_eq!(set.iter().collect::<Vec<_>>(), ["b", "a"]);
    }

    #[test]
    fn empty_string_is_a_value() {
        let mut set = OrderedSet::new();
        set.insert("");
        set.insert("");
        assert_eq!(set.len(), 1);
        assert!(set.contains(""));
        assert!(!set.is_empty());
    }

    #[test]
    fn positional_access() {
        let set: OrderedSet = ["x", "y"].into_iter().collect();
        assert_eq!(set.first(), Some("x"));
        assert_eq!(set.get(1), Some("y"));
        assert_eq!(set.get(2), None);
        assert_eq!(OrderedSet::new().first(), None);
    }

    #[test]
    fn equality_respects_order() {
        let ab: OrderedSet = ["a", "b"].into_iter().collect();
        let ba: OrderedSet = ["b", "a"].into_iter().collect();
        let ab_again: OrderedSet = ["a", "b", "a"].into_iter().collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab_again);
    }

    #[test]
    fn borrowed_iteration() {
        let set: OrderedSet = ["one", "two"].into_iter().collect();
        let mut seen = Vec::new();
        for value in &set {
            seen.push(value.clone());
        }
        assert_eq!(seen, ["one", "two"]);
    }

    #[test]
    fn owned_iteration_keeps_order() {
        let set: OrderedSet = ["two", "one", "two"].into_iter().collect();
        let values: Vec<String> = set.into_iter().collect();
        assert_eq!(values, ["two", "one"]);
    }
}
