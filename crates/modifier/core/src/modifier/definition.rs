//! The canonical, immutable modifier definition.

use roll_predicate::{Predicate, RollOptions};

use super::adjustment::{ModifierAdjustment, adjust_modifiers};
use super::evaluated::EvaluatedModifier;
use super::params::{ItemOrigin, ModifierParams};
use super::types::{Ability, Critical, DamageCategory, DamageType, ModifierKind, ModifierType};
use crate::error::ModifierError;
use crate::slug::sluggify;

/// One named, typed, numeric contribution to a statistic.
///
/// A `Modifier` is never mutated by evaluation. Testing it against a context
/// produces an [`EvaluatedModifier`]; the original value stays recoverable
/// through [`Modifier::value`] no matter how many contexts it is evaluated
/// against.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ModifierParams"))]
pub struct Modifier {
    slug: String,
    label: String,
    value: i32,
    modifier_type: ModifierType,
    ability: Option<Ability>,
    kind: ModifierKind,
    adjustments: Vec<ModifierAdjustment>,
    force: bool,
    ignored: bool,
    predicate: Predicate,
    damage_type: Option<DamageType>,
    damage_category: Option<DamageCategory>,
    critical: Critical,
    source: Option<String>,
    item: Option<ItemOrigin>,
    custom: bool,
}

impl Modifier {
    /// Validate and normalize a construction request.
    ///
    /// # Errors
    ///
    /// - [`ModifierError::MissingLabel`] when neither label nor slug is given
    /// - [`ModifierError::ForcedUntyped`] when `force` is set on an untyped modifier
    pub fn new(params: ModifierParams) -> Result<Self, ModifierError> {
        let ModifierParams {
            slug,
            label,
            modifier,
            modifier_type,
            ability,
            adjustments,
            force,
            ignored,
            predicate,
            damage_type,
            damage_category,
            critical,
            source,
            item,
            custom,
        } = params;

        let slug = match slug.as_deref().map(sluggify) {
            Some(slug) if !slug.is_empty() => slug,
            _ => sluggify(&label),
        };
        if slug.is_empty() {
            return Err(ModifierError::MissingLabel);
        }
        let label = if label.trim().is_empty() {
            slug.clone()
        } else {
            label
        };

        let modifier_type = modifier_type
            .as_deref()
            .map_or(ModifierType::Untyped, ModifierType::parse_or_untyped);
        if force && modifier_type == ModifierType::Untyped {
            return Err(ModifierError::ForcedUntyped { slug });
        }

        let ability = match (modifier_type, ability) {
            (ModifierType::Ability, ability) => ability,
            (_, Some(ability)) => {
                tracing::debug!(
                    "modifier {} is {} typed, discarding ability {}",
                    slug,
                    modifier_type,
                    ability
                );
                None
            }
            (_, None) => None,
        };

        let damage_type = damage_type.as_deref().and_then(DamageType::parse_known);
        let damage_category = DamageCategory::resolve(damage_type, damage_category);
        let critical = Critical::resolve(critical, damage_category);

        Ok(Self {
            kind: ModifierKind::classify(modifier, modifier_type),
            slug,
            label,
            value: modifier,
            modifier_type,
            ability,
            adjustments,
            force,
            ignored,
            predicate,
            damage_type,
            damage_category,
            critical,
            source,
            item,
            custom,
        })
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The original, unadjusted value.
    ///
    /// Integers have no negative zero, so a zero-valued penalty reads as `0`
    /// here; [`Modifier::signed_value`] renders it as `-0`.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Display form of the original value: `+2`, `-1`, and `-0` for a
    /// zero-valued penalty.
    pub fn signed_value(&self) -> String {
        format_signed(self.value, self.kind)
    }

    pub fn modifier_type(&self) -> ModifierType {
        self.modifier_type
    }

    pub fn ability(&self) -> Option<Ability> {
        self.ability
    }

    pub fn kind(&self) -> ModifierKind {
        self.kind
    }

    pub fn adjustments(&self) -> &[ModifierAdjustment] {
        &self.adjustments
    }

    pub fn force(&self) -> bool {
        self.force
    }

    /// Initial ignored state supplied at construction.
    pub fn ignored(&self) -> bool {
        self.ignored
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn damage_type(&self) -> Option<DamageType> {
        self.damage_type
    }

    pub fn damage_category(&self) -> Option<DamageCategory> {
        self.damage_category
    }

    pub fn critical(&self) -> Critical {
        self.critical
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn item(&self) -> Option<&ItemOrigin> {
        self.item.as_ref()
    }

    pub fn custom(&self) -> bool {
        self.custom
    }

    /// Returns a copy carrying additional adjustments.
    ///
    /// Used when a rules pipeline distributes adjustments collected per
    /// selector onto the modifiers of a statistic.
    #[must_use]
    pub fn with_adjustments(&self, extra: impl IntoIterator<Item = ModifierAdjustment>) -> Self {
        let mut modifier = self.clone();
        modifier.adjustments.extend(extra);
        modifier
    }

    /// Returns `true` if the predicate holds for `options`.
    pub fn test(&self, options: &RollOptions) -> bool {
        self.predicate.test(options)
    }

    /// Roll options describing this modifier, for adjustments to match on.
    ///
    /// ```text
    /// {kind}:slug:{slug}
    /// {kind}:type:{type}
    /// {kind}:value:{value}
    /// {kind}:item:type:{item type}           (item provenance)
    /// {kind}:item:slug:{item slug}
    /// {kind}:item:granter:type:{type}        (granter provenance)
    /// {kind}:item:granter:slug:{slug}
    /// ```
    pub fn get_roll_options(&self) -> RollOptions {
        let kind = self.kind;
        let mut options = RollOptions::new();
        options.insert(format!("{kind}:slug:{}", self.slug));
        options.insert(format!("{kind}:type:{}", self.modifier_type));
        options.insert(format!("{kind}:value:{}", self.value));

        if let Some(item) = &self.item {
            options.insert(format!("{kind}:item:type:{}", item.item_type));
            options.insert(format!("{kind}:item:slug:{}", item.slug));
            if let Some(granter) = &item.granter {
                options.insert(format!("{kind}:item:granter:type:{}", granter.item_type));
                options.insert(format!("{kind}:item:granter:slug:{}", granter.slug));
            }
        }

        options
    }

    /// Project this modifier without testing it against any context.
    pub fn project(&self) -> EvaluatedModifier {
        EvaluatedModifier::from_definition(self.clone())
    }

    /// Test this modifier against `options` without running adjustments.
    pub fn tested(&self, options: &RollOptions) -> EvaluatedModifier {
        let mut evaluated = self.project();
        evaluated.ignored = self.ignored || !self.test(options);
        evaluated
    }

    /// Test and adjust this modifier against `options`.
    ///
    /// Stacking is not applied: `enabled` reflects only whether the modifier
    /// survived its own predicate and adjustments.
    pub fn evaluate(&self, options: &RollOptions) -> EvaluatedModifier {
        let mut evaluated = [self.tested(options)];
        adjust_modifiers(&mut evaluated, options);
        let [mut evaluated] = evaluated;
        evaluated.enabled = !evaluated.ignored;
        evaluated
    }
}

impl TryFrom<ModifierParams> for Modifier {
    type Error = ModifierError;

    fn try_from(params: ModifierParams) -> Result<Self, Self::Error> {
        Modifier::new(params)
    }
}

/// Format a value with an explicit sign, rendering a zero penalty as `-0`.
pub(crate) fn format_signed(value: i32, kind: ModifierKind) -> String {
    if value == 0 && kind == ModifierKind::Penalty {
        "-0".to_owned()
    } else {
        format!("{value:+}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::AdjustmentMode;

    fn item_bonus(value: i32) -> Modifier {
        Modifier::new(
            ModifierParams::new("Striking Rune", value)
                .with_type(ModifierType::Item)
                .damage_type("fire"),
        )
        .unwrap()
    }

    #[test]
    fn slug_defaults_from_label() {
        let modifier = item_bonus(1);
        assert_eq!(modifier.slug(), "striking-rune");
        assert_eq!(modifier.label(), "Striking Rune");
    }

    #[test]
    fn unknown_inputs_degrade() {
        let modifier = Modifier::new(
            ModifierParams::new("Odd", 1)
                .with_type("luck")
                .damage_type("positive"),
        )
        .unwrap();

        assert_eq!(modifier.modifier_type(), ModifierType::Untyped);
        assert_eq!(modifier.damage_type(), None);
        assert_eq!(modifier.kind(), ModifierKind::Modifier);
    }

    #[test]
    fn forced_untyped_is_rejected() {
        let result = Modifier::new(ModifierParams::new("Bad", 2).forced());
        assert_eq!(
            result,
            Err(ModifierError::ForcedUntyped {
                slug: "bad".to_owned()
            })
        );
    }

    #[test]
    fn missing_label_is_rejected() {
        let result = Modifier::new(ModifierParams::new("   ", 2));
        assert_eq!(result, Err(ModifierError::MissingLabel));
    }

    #[test]
    fn bleed_forces_persistent_category() {
        let modifier = Modifier::new(
            ModifierParams::new("Serrated", 2)
                .damage_type(DamageType::Bleed)
                .damage_category(DamageCategory::Precision),
        )
        .unwrap();
        assert_eq!(modifier.damage_category(), Some(DamageCategory::Persistent));
    }

    #[test]
    fn splash_critical_is_definite() {
        let modifier = Modifier::new(
            ModifierParams::new("Splash", 1).damage_category(DamageCategory::Splash),
        )
        .unwrap();
        assert_eq!(modifier.critical(), Critical::NotDoubled);
    }

    #[test]
    fn ability_kept_only_for_ability_type() {
        let ability = Modifier::new(
            ModifierParams::new("Strength", 3)
                .with_type(ModifierType::Ability)
                .ability(Ability::Str),
        )
        .unwrap();
        let status = Modifier::new(
            ModifierParams::new("Heroism", 1)
                .with_type(ModifierType::Status)
                .ability(Ability::Str),
        )
        .unwrap();

        assert_eq!(ability.ability(), Some(Ability::Str));
        assert_eq!(status.ability(), None);
    }

    #[test]
    fn zero_penalty_keeps_penalty_display() {
        let penalty = Modifier::new(
            ModifierParams::new("Frightened", -2).with_type(ModifierType::Status),
        )
        .unwrap()
        .with_adjustments([ModifierAdjustment::new().value(AdjustmentMode::Override(0))]);

        let evaluated = penalty.evaluate(&RollOptions::new());
        assert_eq!(evaluated.value(), 0);
        assert_eq!(evaluated.kind(), ModifierKind::Penalty);
        assert_eq!(evaluated.signed_value(), "-0");
        assert_eq!(penalty.signed_value(), "-2");
    }

    #[test]
    fn roll_options_include_provenance() {
        let modifier = Modifier::new(
            ModifierParams::new("Potency", 1)
                .with_type(ModifierType::Item)
                .item(ItemOrigin::new("weapon", "longsword").granted_by("feat", "weapon-master")),
        )
        .unwrap();

        let options = modifier.get_roll_options();
        assert!(options.contains("bonus:slug:potency"));
        assert!(options.contains("bonus:type:item"));
        assert!(options.contains("bonus:value:1"));
        assert!(options.contains("bonus:item:type:weapon"));
        assert!(options.contains("bonus:item:slug:longsword"));
        assert!(options.contains("bonus:item:granter:type:feat"));
        assert!(options.contains("bonus:item:granter:slug:weapon-master"));
    }

    #[test]
    fn evaluation_never_mutates_definition() {
        let original = item_bonus(1).with_adjustments([ModifierAdjustment::new()
            .value(AdjustmentMode::Add(2))
            .relabel("Empowered Rune")
            .damage_type(DamageType::Cold)]);
        let copy = original.clone();

        let evaluated = copy.evaluate(&RollOptions::new().with("anything"));
        assert_eq!(evaluated.value(), 3);
        assert_eq!(evaluated.label(), "Empowered Rune");
        assert_eq!(evaluated.damage_type(), Some(DamageType::Cold));

        assert_eq!(copy, original);
        assert_eq!(original.value(), 1);
        assert_eq!(original.label(), "Striking Rune");
        assert_eq!(original.damage_type(), Some(DamageType::Fire));
    }

    #[test]
    fn predicate_failure_ignores() {
        let modifier = Modifier::new(
            ModifierParams::new("Flanking", 2)
                .with_type(ModifierType::Circumstance)
                .predicate(Predicate::new().and("target:flanked")),
        )
        .unwrap();

        assert!(modifier.evaluate(&RollOptions::new()).ignored());
        assert!(modifier.evaluate(&RollOptions::new().with("target:flanked")).enabled());
    }
}
