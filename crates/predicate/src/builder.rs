//! Builder utilities for ergonomic predicate construction.
//!
//! Instead of writing `Statement::Or(vec![Statement::Atom("a".into()), ...])`,
//! you can write `any(["a", "b"])`.

use crate::{CompareOp, Statement};

/// Creates an AND statement from atoms or statements.
#[inline]
pub fn all<S: Into<Statement>>(children: impl IntoIterator<Item = S>) -> Statement {
    Statement::And(children.into_iter().map(Into::into).collect())
}

/// Creates an OR statement from atoms or statements.
#[inline]
pub fn any<S: Into<Statement>>(children: impl IntoIterator<Item = S>) -> Statement {
    Statement::Or(children.into_iter().map(Into::into).collect())
}

/// Creates a NOT statement.
#[inline]
pub fn not(child: impl Into<Statement>) -> Statement {
    Statement::not(child.into())
}

/// Shorthand for `Statement::compare(CompareOp::Gte, option, value)`.
#[inline]
pub fn gte(option: impl Into<String>, value: i64) -> Statement {
    Statement::compare(CompareOp::Gte, option, value)
}

/// Shorthand for `Statement::compare(CompareOp::Lte, option, value)`.
#[inline]
pub fn lte(option: impl Into<String>, value: i64) -> Statement {
    Statement::compare(CompareOp::Lte, option, value)
}
