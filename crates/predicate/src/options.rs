//! Evaluation context: the set of roll options true for one evaluation.

use std::collections::BTreeSet;

/// A set of roll-option tags.
///
/// Backed by a `BTreeSet` so iteration order (and therefore anything derived
/// from it) is stable across runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RollOptions {
    options: BTreeSet<String>,
}

impl RollOptions {
    /// Create an empty context.
    pub fn new() -> Self {
        Self {
            options: BTreeSet::new(),
        }
    }

    /// Add an option. Returns `true` if it was not already present.
    pub fn insert(&mut self, option: impl Into<String>) -> bool {
        self.options.insert(option.into())
    }

    /// Add an option (builder pattern).
    #[must_use]
    pub fn with(mut self, option: impl Into<String>) -> Self {
        self.insert(option);
        self
    }

    /// Remove an option. Returns `true` if it was present.
    pub fn remove(&mut self, option: &str) -> bool {
        self.options.remove(option)
    }

    pub fn contains(&self, option: &str) -> bool {
        self.options.contains(option)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(String::as_str)
    }

    /// Returns a new context containing the options of both sets.
    pub fn union(&self, other: &RollOptions) -> RollOptions {
        let mut merged = self.clone();
        merged.extend(other.options.iter().cloned());
        merged
    }

    /// Numeric values carried by options of the form `{prefix}:{number}`.
    ///
    /// `"self:level:5"` yields `5` for the prefix `"self:level"`. Options whose
    /// suffix is not an integer are skipped.
    pub fn numeric_values<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = i64> + 'a {
        self.options.iter().filter_map(move |option| {
            option
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix(':'))
                .and_then(|value| value.parse::<i64>().ok())
        })
    }
}

impl<S: Into<String>> FromIterator<S> for RollOptions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for RollOptions {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.options.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a RollOptions {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
