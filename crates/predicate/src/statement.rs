//! Predicate statements.
//!
//! Statements form a small expression tree: atoms test for the presence of a
//! roll option, comparisons test numeric options, and the combinators
//! [`Statement::And`] / [`Statement::Or`] / [`Statement::Not`] compose them
//! with short-circuiting semantics.

use crate::RollOptions;

/// Comparison operator for numeric roll options.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CompareOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    #[inline]
    pub fn holds(self, left: i64, right: i64) -> bool {
        match self {
            CompareOp::Eq => left == right,
            CompareOp::Gt => left > right,
            CompareOp::Gte => left >= right,
            CompareOp::Lt => left < right,
            CompareOp::Lte => left <= right,
        }
    }
}

/// A single predicate statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Statement {
    /// Holds when the option is present.
    Atom(String),

    /// Holds when some option `{option}:{n}` exists with `n <op> value`.
    Compare {
        op: CompareOp,
        option: String,
        value: i64,
    },

    /// Holds when every child holds. An empty list holds.
    And(Vec<Statement>),

    /// Holds when at least one child holds. An empty list does not hold.
    Or(Vec<Statement>),

    /// Holds when the child does not.
    Not(Box<Statement>),
}

impl Statement {
    pub fn atom(option: impl Into<String>) -> Self {
        Statement::Atom(option.into())
    }

    pub fn not(statement: Statement) -> Self {
        Statement::Not(Box::new(statement))
    }

    pub fn compare(op: CompareOp, option: impl Into<String>, value: i64) -> Self {
        Statement::Compare {
            op,
            option: option.into(),
            value,
        }
    }

    /// Evaluate this statement against a set of roll options.
    pub fn test(&self, options: &RollOptions) -> bool {
        match self {
            Statement::Atom(option) => options.contains(option),
            Statement::Compare { op, option, value } => options
                .numeric_values(option)
                .any(|found| op.holds(found, *value)),
            Statement::And(children) => children.iter().all(|child| child.test(options)),
            Statement::Or(children) => children.iter().any(|child| child.test(options)),
            Statement::Not(child) => !child.test(options),
        }
    }
}

impl From<&str> for Statement {
    fn from(option: &str) -> Self {
        Statement::atom(option)
    }
}

impl From<String> for Statement {
    fn from(option: String) -> Self {
        Statement::Atom(option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(tags: &[&str]) -> RollOptions {
        tags.iter().copied().collect()
    }

    #[test]
    fn atom_requires_exact_option() {
        let ctx = options(&["target:condition:off-guard"]);
        assert!(Statement::atom("target:condition:off-guard").test(&ctx));
        assert!(!Statement::atom("target:condition").test(&ctx));
    }

    #[test]
    fn combinators_short_circuit_as_logic() {
        let ctx = options(&["melee", "attack"]);

        assert!(Statement::And(vec!["melee".into(), "attack".into()]).test(&ctx));
        assert!(!Statement::And(vec!["melee".into(), "ranged".into()]).test(&ctx));
        assert!(Statement::Or(vec!["ranged".into(), "attack".into()]).test(&ctx));
        assert!(!Statement::Or(vec![]).test(&ctx));
        assert!(Statement::And(vec![]).test(&ctx));
        assert!(Statement::not("ranged".into()).test(&ctx));
    }

    #[test]
    fn comparison_matches_any_numeric_option() {
        let ctx = options(&["self:level:5", "target:level:7"]);

        assert!(Statement::compare(CompareOp::Gte, "self:level", 5).test(&ctx));
        assert!(!Statement::compare(CompareOp::Gt, "self:level", 5).test(&ctx));
        assert!(Statement::compare(CompareOp::Lt, "target:level", 8).test(&ctx));
        // No matching option at all
        assert!(!Statement::compare(CompareOp::Eq, "origin:level", 0).test(&ctx));
    }

    #[test]
    fn compare_op_parses_case_insensitively() {
        assert_eq!("GTE".parse::<CompareOp>(), Ok(CompareOp::Gte));
        assert_eq!(CompareOp::Lte.as_ref(), "lte");
    }
}
