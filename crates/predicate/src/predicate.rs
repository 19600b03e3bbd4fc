//! Top-level predicate: a conjunction of statements.

use crate::{RollOptions, Statement};

/// A boolean expression over roll options.
///
/// The top level is an implicit AND: the predicate holds when every statement
/// holds. The empty predicate is vacuously true, which is what most rule
/// sources use when a contribution applies unconditionally.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Predicate {
    statements: Vec<Statement>,
}

impl Predicate {
    /// The always-true predicate.
    pub fn new() -> Self {
        Self {
            statements: Vec::new(),
        }
    }

    pub fn from_statements(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Add a statement (builder pattern).
    #[must_use]
    pub fn and(mut self, statement: impl Into<Statement>) -> Self {
        self.statements.push(statement.into());
        self
    }

    pub fn push(&mut self, statement: impl Into<Statement>) {
        self.statements.push(statement.into());
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Returns `true` if this predicate has no statements (always holds).
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn test(&self, options: &RollOptions) -> bool {
        self.statements.iter().all(|statement| statement.test(options))
    }
}

impl<S: Into<Statement>> FromIterator<S> for Predicate {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            statements: iter.into_iter().map(Into::into).collect(),
        }
    }
}
