//! Damage dice modifiers.
//!
//! A [`DiceModifier`] contributes dice rather than a flat number. It shares
//! the predicate / category / critical vocabulary of [`Modifier`](crate::Modifier)
//! but does not stack by type: additive dice are always summed, and a dice
//! modifier with a [`DiceOverride`] rewrites the base damage die instead of
//! adding to it.
//!
//! # Module Structure
//!
//! - `modifier`: DieSize, DiceOverride, DiceModifier and its params
//! - `damage`: assembling a damage formula from base damage, dice and flat modifiers

pub mod damage;
pub mod modifier;

pub use damage::{BaseDamage, DamageFormula, DamageTerm};
pub use modifier::{DiceModifier, DiceModifierParams, DiceOverride, DieSize, EvaluatedDice};
