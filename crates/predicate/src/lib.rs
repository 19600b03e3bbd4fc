//! Roll options and predicates over them.
//!
//! A roll option is a free-form string tag describing a fact that holds for
//! one evaluation (`"target:condition:off-guard"`, `"self:level:5"`). A
//! predicate is a boolean expression over those tags.
//!
//! - **Deterministic**: options are kept in a sorted set
//! - **No evaluation errors**: a statement either holds or it doesn't
//! - **Data-driven**: every statement is a plain enum, serializable with `serde`
//!
//! # Architecture
//!
//! - [`RollOptions`]: the evaluation context
//! - [`Statement`]: a single atom, comparison, or logical combinator
//! - [`Predicate`]: a conjunction of statements; the empty predicate always holds

pub mod builder;
pub mod options;
pub mod predicate;
pub mod statement;

// Re-export core types for ergonomic API
pub use options::RollOptions;
pub use predicate::Predicate;
pub use statement::{CompareOp, Statement};
