//! Candidate label maps.
//!
//! Selectors are evaluated against anything implementing [`Labels`]. The
//! common map types are covered out of the box; implement the trait for your
//! own types to match them without copying their labels into a map.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;

/// Read-only view of a string-to-string label mapping.
///
/// # Manual Implementation
///
/// ```
/// use standout_selector::{parse, Labels};
///
/// struct Pod {
///     app: String,
///     tier: Option<String>,
/// }
///
/// impl Labels for Pod {
///     fn label(&self, key: &str) -> Option<&str> {
///         match key {
///             "app" => Some(self.app.as_str()),
///             "tier" => self.tier.as_deref(),
///             _ => None,
///         }
///     }
/// }
///
/// let pod = Pod { app: "web".into(), tier: None };
/// assert!(parse("app=web,!tier").unwrap().matches(&pod));
/// ```
pub trait Labels {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn label(&self, key: &str) -> Option<&str>;

    /// Returns `true` if `key` is present.
    fn has_label(&self, key: &str) -> bool {
        self.label(key).is_some()
    }
}

impl<T: Labels + ?Sized> Labels for &T {
    fn label(&self, key: &str) -> Option<&str> {
        (**self).label(key)
    }
}

impl<K, V, S> Labels for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn label(&self, key: &str) -> Option<&str> {
        self.get(key).map(AsRef::as_ref)
    }
}

impl<K, V> Labels for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn label(&self, key: &str) -> Option<&str> {
        self.get(key).map(AsRef::as_ref)
    }
}

impl<K, V, S> Labels for IndexMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn label(&self, key: &str) -> Option<&str> {
        self.get(key).map(AsRef::as_ref)
    }
}
