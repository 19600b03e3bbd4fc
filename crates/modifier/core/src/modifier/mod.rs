//! Modifier domain - typed numeric contributions and their adjustments.
//!
//! # Lifecycle
//!
//! 1. A rule source builds [`ModifierParams`] and calls [`Modifier::new`],
//!    which validates and normalizes the request.
//! 2. At evaluation time the modifier is tested against a context and its
//!    adjustments are applied, producing an [`EvaluatedModifier`].
//! 3. The stacking engine decides which evaluated modifiers are enabled.
//!
//! The definition is never mutated along the way, so the same modifier can be
//! evaluated against any number of contexts.
//!
//! # Module Structure
//!
//! - `types`: closed vocabularies (ModifierType, ModifierKind, DamageType, ...)
//! - `params`: raw construction requests
//! - `definition`: the canonical [`Modifier`]
//! - `evaluated`: the per-context projection
//! - `adjustment`: adjustments, the adjustment pass, and the selector registry

pub mod adjustment;
pub mod definition;
pub mod evaluated;
pub mod params;
pub mod types;

pub use adjustment::{
    AdjustmentMode, AdjustmentRegistry, ModifierAdjustment, adjust_modifiers,
    extract_modifier_adjustments,
};
pub use definition::Modifier;
pub use evaluated::EvaluatedModifier;
pub use params::{Granter, ItemOrigin, ModifierParams};
pub use types::{Ability, Critical, DamageCategory, DamageType, ModifierKind, ModifierType};
