//! Common error infrastructure for modifier-core.
//!
//! Construction of a modifier or a damage-dice modifier can fail when the
//! request is self-contradictory. Those failures are fatal: the engine refuses
//! to build the value rather than silently dropping the offending semantics.
//! Unknown enum-like inputs (`type`, `damageType`) are not errors; they
//! degrade to safe defaults at parse time.

/// Common trait for all modifier-core errors.
///
/// Provides a stable identifier for each variant, useful for
/// categorization and assertions in tests.
pub trait RuleError: core::fmt::Display + core::fmt::Debug {
    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

// ============================================================================
// Modifier Errors
// ============================================================================

/// Errors raised while constructing a [`Modifier`](crate::Modifier).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModifierError {
    /// Neither a label nor a slug was supplied.
    #[error("Modifier has neither a label nor a slug")]
    MissingLabel,

    /// `force` on an untyped modifier is meaningless: untyped always stacks.
    #[error("Forced modifier {slug:?} must have a type other than untyped")]
    ForcedUntyped { slug: String },
}

impl RuleError for ModifierError {
    fn error_code(&self) -> &'static str {
        match self {
            ModifierError::MissingLabel => "MODIFIER_MISSING_LABEL",
            ModifierError::ForcedUntyped { .. } => "MODIFIER_FORCED_UNTYPED",
        }
    }
}

// ============================================================================
// Dice Modifier Errors
// ============================================================================

/// Errors raised while constructing a [`DiceModifier`](crate::DiceModifier).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceModifierError {
    /// Neither a label nor a slug was supplied.
    #[error("Dice modifier has neither a label nor a slug")]
    MissingLabel,

    /// Dice modifiers are distributed by selector; one is required.
    #[error("Dice modifier {slug:?} is missing a selector")]
    MissingSelector { slug: String },

    /// An override that changes nothing.
    #[error("Dice modifier {slug:?} has an empty override")]
    EmptyOverride { slug: String },

    /// Upgrading and downgrading the same die at once.
    #[error("Dice modifier {slug:?} cannot both upgrade and downgrade")]
    ConflictingOverride { slug: String },
}

impl RuleError for DiceModifierError {
    fn error_code(&self) -> &'static str {
        match self {
            DiceModifierError::MissingLabel => "DICE_MISSING_LABEL",
            DiceModifierError::MissingSelector { .. } => "DICE_MISSING_SELECTOR",
            DiceModifierError::EmptyOverride { .. } => "DICE_EMPTY_OVERRIDE",
            DiceModifierError::ConflictingOverride { .. } => "DICE_CONFLICTING_OVERRIDE",
        }
    }
}
