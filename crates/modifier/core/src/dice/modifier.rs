//! Dice modifier definition.

use roll_predicate::{Predicate, RollOptions};

use crate::error::DiceModifierError;
use crate::modifier::{Critical, DamageCategory, DamageType};
use crate::slug::sluggify;

// ============================================================================
// Die Size
// ============================================================================

/// Die sizes that can be stepped up or down.
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
pub enum DieSize {
    D4,
    D6,
    D8,
    D10,
    D12,
}

impl DieSize {
    pub const fn faces(self) -> u32 {
        match self {
            DieSize::D4 => 4,
            DieSize::D6 => 6,
            DieSize::D8 => 8,
            DieSize::D10 => 10,
            DieSize::D12 => 12,
        }
    }

    /// One step larger, saturating at d12.
    pub const fn upgrade(self) -> Self {
        match self {
            DieSize::D4 => DieSize::D6,
            DieSize::D6 => DieSize::D8,
            DieSize::D8 => DieSize::D10,
            DieSize::D10 | DieSize::D12 => DieSize::D12,
        }
    }

    /// One step smaller, saturating at d4.
    pub const fn downgrade(self) -> Self {
        match self {
            DieSize::D4 | DieSize::D6 => DieSize::D4,
            DieSize::D8 => DieSize::D6,
            DieSize::D10 => DieSize::D8,
            DieSize::D12 => DieSize::D10,
        }
    }
}

// ============================================================================
// Override
// ============================================================================

/// Rewrite of the base damage die.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DiceOverride {
    pub upgrade: bool,
    pub downgrade: bool,
    pub die_size: Option<DieSize>,
    pub damage_type: Option<DamageType>,
    pub dice_number: Option<u32>,
}

impl DiceOverride {
    pub fn upgrade() -> Self {
        Self {
            upgrade: true,
            ..Self::default()
        }
    }

    pub fn downgrade() -> Self {
        Self {
            downgrade: true,
            ..Self::default()
        }
    }

    pub fn die_size(die_size: DieSize) -> Self {
        Self {
            die_size: Some(die_size),
            ..Self::default()
        }
    }

    pub fn damage_type(damage_type: DamageType) -> Self {
        Self {
            damage_type: Some(damage_type),
            ..Self::default()
        }
    }

    pub fn dice_number(dice_number: u32) -> Self {
        Self {
            dice_number: Some(dice_number),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.upgrade
            && !self.downgrade
            && self.die_size.is_none()
            && self.damage_type.is_none()
            && self.dice_number.is_none()
    }
}

// ============================================================================
// Dice Modifier
// ============================================================================

/// Raw construction request for a [`DiceModifier`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DiceModifierParams {
    pub slug: Option<String>,
    pub label: String,
    /// Statistic selector the dice are attached to (`"strike-damage"`, ...).
    pub selector: Option<String>,
    pub dice_number: u32,
    pub die_size: Option<DieSize>,
    pub critical: Option<bool>,
    pub category: Option<DamageCategory>,
    pub damage_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "override"))]
    pub dice_override: Option<DiceOverride>,
    pub predicate: Predicate,
    pub ignored: bool,
    pub source: Option<String>,
}

impl DiceModifierParams {
    pub fn new(label: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            selector: Some(selector.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    #[must_use]
    pub fn dice(mut self, dice_number: u32, die_size: DieSize) -> Self {
        self.dice_number = dice_number;
        self.die_size = Some(die_size);
        self
    }

    #[must_use]
    pub fn critical(mut self, critical: bool) -> Self {
        self.critical = Some(critical);
        self
    }

    #[must_use]
    pub fn category(mut self, category: DamageCategory) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn damage_type(mut self, damage_type: impl AsRef<str>) -> Self {
        self.damage_type = Some(damage_type.as_ref().to_owned());
        self
    }

    #[must_use]
    pub fn with_override(mut self, dice_override: DiceOverride) -> Self {
        self.dice_override = Some(dice_override);
        self
    }

    #[must_use]
    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = predicate;
        self
    }

    #[must_use]
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }
}

/// Additive damage dice, or a rewrite of the base damage die.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DiceModifierParams"))]
pub struct DiceModifier {
    slug: String,
    label: String,
    selector: String,
    dice_number: u32,
    die_size: Option<DieSize>,
    critical: Critical,
    category: Option<DamageCategory>,
    damage_type: Option<DamageType>,
    dice_override: Option<DiceOverride>,
    predicate: Predicate,
    ignored: bool,
    source: Option<String>,
}

impl DiceModifier {
    /// Validate and normalize a construction request.
    ///
    /// # Errors
    ///
    /// - [`DiceModifierError::MissingLabel`] when neither label nor slug is given
    /// - [`DiceModifierError::MissingSelector`] when no selector is given
    /// - [`DiceModifierError::EmptyOverride`] for an override that changes nothing
    /// - [`DiceModifierError::ConflictingOverride`] for upgrade plus downgrade
    pub fn new(params: DiceModifierParams) -> Result<Self, DiceModifierError> {
        let slug = match params.slug.as_deref().map(sluggify) {
            Some(slug) if !slug.is_empty() => slug,
            _ => sluggify(&params.label),
        };
        if slug.is_empty() {
            return Err(DiceModifierError::MissingLabel);
        }

        let selector = match params.selector {
            Some(selector) if !selector.trim().is_empty() => selector,
            _ => return Err(DiceModifierError::MissingSelector { slug }),
        };

        if let Some(dice_override) = &params.dice_override {
            if dice_override.is_empty() {
                return Err(DiceModifierError::EmptyOverride { slug });
            }
            if dice_override.upgrade && dice_override.downgrade {
                return Err(DiceModifierError::ConflictingOverride { slug });
            }
        }

        let label = if params.label.trim().is_empty() {
            slug.clone()
        } else {
            params.label
        };
        let damage_type = params
            .damage_type
            .as_deref()
            .and_then(DamageType::parse_known);
        // Bleed dice are persistent, as with flat bleed
        let category = DamageCategory::resolve(damage_type, params.category);

        Ok(Self {
            slug,
            label,
            selector,
            dice_number: params.dice_number,
            die_size: params.die_size,
            critical: Critical::resolve(params.critical, category),
            category,
            damage_type,
            dice_override: params.dice_override,
            predicate: params.predicate,
            ignored: params.ignored,
            source: params.source,
        })
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn dice_number(&self) -> u32 {
        self.dice_number
    }

    pub fn die_size(&self) -> Option<DieSize> {
        self.die_size
    }

    pub fn critical(&self) -> Critical {
        self.critical
    }

    pub fn category(&self) -> Option<DamageCategory> {
        self.category
    }

    pub fn damage_type(&self) -> Option<DamageType> {
        self.damage_type
    }

    pub fn dice_override(&self) -> Option<&DiceOverride> {
        self.dice_override.as_ref()
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn ignored(&self) -> bool {
        self.ignored
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Additive dice carry a count and a size; anything else only overrides.
    pub fn is_additive(&self) -> bool {
        self.dice_number > 0 && self.die_size.is_some()
    }

    pub fn test(&self, options: &RollOptions) -> bool {
        self.predicate.test(options)
    }

    pub fn evaluate(&self, options: &RollOptions) -> EvaluatedDice {
        let ignored = self.ignored || !self.test(options);
        EvaluatedDice {
            definition: self.clone(),
            enabled: !ignored,
            ignored,
        }
    }
}

impl TryFrom<DiceModifierParams> for DiceModifier {
    type Error = DiceModifierError;

    fn try_from(params: DiceModifierParams) -> Result<Self, Self::Error> {
        DiceModifier::new(params)
    }
}

/// A [`DiceModifier`] tested against one context.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedDice {
    definition: DiceModifier,
    enabled: bool,
    ignored: bool,
}

impl EvaluatedDice {
    pub fn definition(&self) -> &DiceModifier {
        &self.definition
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn ignored(&self) -> bool {
        self.ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_steps_saturate() {
        assert_eq!(DieSize::D4.upgrade(), DieSize::D6);
        assert_eq!(DieSize::D12.upgrade(), DieSize::D12);
        assert_eq!(DieSize::D4.downgrade(), DieSize::D4);
        assert_eq!(DieSize::D10.downgrade(), DieSize::D8);
        assert_eq!("D8".parse::<DieSize>(), Ok(DieSize::D8));
        assert_eq!(DieSize::D10.to_string(), "d10");
    }

    #[test]
    fn selector_is_required() {
        let mut params = DiceModifierParams::new("Flaming", "strike-damage");
        params.selector = None;
        assert_eq!(
            DiceModifier::new(params),
            Err(DiceModifierError::MissingSelector {
                slug: "flaming".to_owned()
            })
        );
    }

    #[test]
    fn override_validation() {
        let empty = DiceModifierParams::new("Nothing", "damage").with_override(DiceOverride::default());
        assert!(matches!(
            DiceModifier::new(empty),
            Err(DiceModifierError::EmptyOverride { .. })
        ));

        let both = DiceModifierParams::new("Both", "damage").with_override(DiceOverride {
            upgrade: true,
            downgrade: true,
            ..DiceOverride::default()
        });
        assert!(matches!(
            DiceModifier::new(both),
            Err(DiceModifierError::ConflictingOverride { .. })
        ));
    }

    #[test]
    fn bleed_category_matches_flat_modifiers() {
        let dice = DiceModifier::new(
            DiceModifierParams::new("Serrated", "strike-damage")
                .dice(1, DieSize::D6)
                .damage_type("bleed")
                .category(DamageCategory::Precision),
        )
        .unwrap();
        assert_eq!(dice.category(), Some(DamageCategory::Persistent));
        assert_eq!(dice.damage_type(), Some(DamageType::Bleed));
    }

    #[test]
    fn evaluation_follows_predicate() {
        let dice = DiceModifier::new(
            DiceModifierParams::new("Sneak Attack", "strike-damage")
                .dice(1, DieSize::D6)
                .category(DamageCategory::Precision)
                .predicate(Predicate::new().and("target:off-guard")),
        )
        .unwrap();

        let miss = dice.evaluate(&RollOptions::new());
        assert!(miss.ignored());
        assert!(!miss.enabled());

        let hit = dice.evaluate(&RollOptions::new().with("target:off-guard"));
        assert!(hit.enabled());
        assert_eq!(hit.definition(), &dice);
    }
}
