//! Closed vocabularies shared by modifiers, adjustments and damage dice.
//!
//! Every enum here parses from the kebab-case strings used by rule data
//! (`"circumstance"`, `"bleed"`, `"persistent"`). Parsing is strict; the
//! permissive fallbacks live in [`ModifierType::parse_or_untyped`] and
//! [`DamageType::parse_known`].

use core::str::FromStr;

// ============================================================================
// Modifier Type
// ============================================================================

/// Stacking category of a modifier.
///
/// Bonuses and penalties of the same type do not stack with each other (the
/// best one wins). `Untyped` contributions always stack. `Ability` is
/// exclusive across the whole statistic regardless of sign.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ModifierType {
    Ability,
    Circumstance,
    Item,
    Potency,
    Proficiency,
    Status,
    #[default]
    Untyped,
}

impl ModifierType {
    /// Parse a type from permissive rule data. Unknown values fall back to
    /// `Untyped`.
    pub fn parse_or_untyped(raw: &str) -> Self {
        Self::from_str(raw).unwrap_or_else(|_| {
            tracing::warn!("unknown modifier type {:?}, treating as untyped", raw);
            ModifierType::Untyped
        })
    }

    /// Returns true if contributions of this type always stack.
    pub const fn always_stacks(self) -> bool {
        matches!(self, ModifierType::Untyped)
    }
}

// ============================================================================
// Ability
// ============================================================================

/// Ability score a modifier of type [`ModifierType::Ability`] derives from.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

// ============================================================================
// Modifier Kind
// ============================================================================

/// Display classification derived from a modifier's sign and type.
///
/// Computed once at construction. An adjustment that later zeroes a penalty
/// does not turn it into a bonus.
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
#[strum(serialize_all = "lowercase")]
pub enum ModifierKind {
    Bonus,
    Penalty,
    Modifier,
}

impl ModifierKind {
    pub fn classify(value: i32, modifier_type: ModifierType) -> Self {
        use ModifierType::{Ability, Untyped};
        match modifier_type {
            Ability => ModifierKind::Modifier,
            Untyped if value >= 0 => ModifierKind::Modifier,
            _ if value < 0 => ModifierKind::Penalty,
            _ => ModifierKind::Bonus,
        }
    }
}

// ============================================================================
// Damage Vocabulary
// ============================================================================

/// Known damage types. Anything else coming from rule data is dropped.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DamageType {
    Acid,
    Bleed,
    Bludgeoning,
    Cold,
    Electricity,
    Fire,
    Force,
    Mental,
    Piercing,
    Poison,
    Slashing,
    Sonic,
    Spirit,
    Untyped,
    Vitality,
    Void,
}

impl DamageType {
    /// Parse a damage type from permissive rule data, returning `None` for
    /// values outside the known vocabulary.
    pub fn parse_known(raw: &str) -> Option<Self> {
        match Self::from_str(raw) {
            Ok(damage_type) => Some(damage_type),
            Err(_) => {
                tracing::warn!("unknown damage type {:?}, dropping it", raw);
                None
            }
        }
    }
}

/// Damage category. Absent means ordinary damage.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DamageCategory {
    Persistent,
    Precision,
    Splash,
}

impl DamageCategory {
    /// Bleed is always persistent, whatever the caller asked for.
    pub fn resolve(
        damage_type: Option<DamageType>,
        requested: Option<DamageCategory>,
    ) -> Option<DamageCategory> {
        match damage_type {
            Some(DamageType::Bleed) => Some(DamageCategory::Persistent),
            _ => requested,
        }
    }
}

/// How a damage contribution behaves on a critical hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Critical {
    /// Applies on any hit and is doubled on a critical.
    #[default]
    Doubles,
    /// Applies only on a critical hit.
    CriticalOnly,
    /// Applies on any hit and is never doubled.
    NotDoubled,
}

impl Critical {
    /// Map the nullable flag used by rule data (`null` / `true` / `false`).
    pub const fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            None => Critical::Doubles,
            Some(true) => Critical::CriticalOnly,
            Some(false) => Critical::NotDoubled,
        }
    }

    /// Splash damage is never doubled on a critical: it is either
    /// critical-only or not doubled.
    pub fn resolve(flag: Option<bool>, category: Option<DamageCategory>) -> Self {
        match category {
            Some(DamageCategory::Splash) => Self::from_flag(Some(flag.unwrap_or(false))),
            _ => Self::from_flag(flag),
        }
    }

    /// Whether a contribution with this setting is present for the outcome.
    pub const fn applies(self, critical_hit: bool) -> bool {
        !matches!(self, Critical::CriticalOnly) || critical_hit
    }

    /// Whether a contribution with this setting is doubled for the outcome.
    pub const fn doubles(self, critical_hit: bool) -> bool {
        critical_hit && matches!(self, Critical::Doubles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classification() {
        assert_eq!(ModifierKind::classify(2, ModifierType::Item), ModifierKind::Bonus);
        assert_eq!(ModifierKind::classify(0, ModifierType::Status), ModifierKind::Bonus);
        assert_eq!(ModifierKind::classify(-1, ModifierType::Status), ModifierKind::Penalty);
        assert_eq!(ModifierKind::classify(-1, ModifierType::Untyped), ModifierKind::Penalty);
        assert_eq!(ModifierKind::classify(0, ModifierType::Untyped), ModifierKind::Modifier);
        assert_eq!(ModifierKind::classify(3, ModifierType::Untyped), ModifierKind::Modifier);
        assert_eq!(ModifierKind::classify(-2, ModifierType::Ability), ModifierKind::Modifier);
        assert_eq!(ModifierKind::classify(4, ModifierType::Ability), ModifierKind::Modifier);
    }

    #[test]
    fn permissive_parsing() {
        assert_eq!(ModifierType::parse_or_untyped("Circumstance"), ModifierType::Circumstance);
        assert_eq!(ModifierType::parse_or_untyped("luck"), ModifierType::Untyped);
        assert_eq!(DamageType::parse_known("fire"), Some(DamageType::Fire));
        assert_eq!(DamageType::parse_known("positive"), None);
    }

    #[test]
    fn bleed_is_always_persistent() {
        assert_eq!(
            DamageCategory::resolve(Some(DamageType::Bleed), Some(DamageCategory::Splash)),
            Some(DamageCategory::Persistent)
        );
        assert_eq!(
            DamageCategory::resolve(Some(DamageType::Fire), Some(DamageCategory::Splash)),
            Some(DamageCategory::Splash)
        );
    }

    #[test]
    fn splash_never_uses_default_doubling() {
        let splash = Some(DamageCategory::Splash);
        assert_eq!(Critical::resolve(None, splash), Critical::NotDoubled);
        assert_eq!(Critical::resolve(Some(true), splash), Critical::CriticalOnly);
        assert_eq!(Critical::resolve(None, None), Critical::Doubles);
    }

    #[test]
    fn critical_outcomes() {
        assert!(!Critical::CriticalOnly.applies(false));
        assert!(Critical::CriticalOnly.applies(true));
        assert!(Critical::Doubles.doubles(true));
        assert!(!Critical::NotDoubled.doubles(true));
        assert!(!Critical::Doubles.doubles(false));
    }
}
