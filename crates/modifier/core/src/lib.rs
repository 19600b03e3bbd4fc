//! Deterministic modifier stacking for character statistics.
//!
//! `modifier-core` computes the effective value of a statistic (an attack
//! bonus, a saving throw, a skill check, a damage roll) from many
//! independently-sourced contributions. Same-type bonuses and penalties are
//! mutually exclusive, untyped contributions always stack, ability
//! contributions are exclusive across the whole statistic, and predicate-gated
//! adjustments can suppress, relabel or rewrite contributions just before the
//! total is struck.
//!
//! Evaluation is pure: definitions ([`Modifier`], [`DiceModifier`]) are never
//! mutated, and every evaluation against a context produces fresh projections
//! ([`EvaluatedModifier`], [`EvaluatedDice`]).
pub mod config;
pub mod dice;
pub mod error;
pub mod modifier;
pub mod slug;
pub mod stacking;
pub mod statistic;

pub use config::EngineConfig;
pub use dice::{
    BaseDamage, DamageFormula, DamageTerm, DiceModifier, DiceModifierParams, DiceOverride,
    DieSize, EvaluatedDice,
};
pub use error::{DiceModifierError, ModifierError, RuleError};
pub use modifier::{
    Ability, AdjustmentMode, AdjustmentRegistry, Critical, DamageCategory, DamageType,
    EvaluatedModifier, Granter, ItemOrigin, Modifier, ModifierAdjustment, ModifierKind,
    ModifierParams, ModifierType, adjust_modifiers, extract_modifier_adjustments,
};
pub use roll_predicate::{Predicate, RollOptions, Statement};
pub use slug::sluggify;
pub use stacking::apply_stacking_rules;
pub use statistic::{CheckModifier, StatisticModifier};
