//! Predicate-gated rewrites applied to modifiers just before stacking.
//!
//! An adjustment can suppress a modifier outright, rewrite its value, rewrite
//! its damage type, or relabel it. Adjustments are collected per selector
//! (`"attack"`, `"fortitude"`, `"damage"`) by the rules pipeline and attached
//! to the modifiers they target with [`extract_modifier_adjustments`].

use std::cmp::Reverse;
use std::collections::BTreeMap;

use roll_predicate::{Predicate, RollOptions};

use super::evaluated::EvaluatedModifier;
use super::types::DamageType;

// ============================================================================
// Adjustment Mode
// ============================================================================

/// How an adjustment rewrites a modifier's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AdjustmentMode {
    /// `value + n`
    Add(i32),
    /// `value - n`
    Subtract(i32),
    /// `value * n`
    Multiply(i32),
    /// `max(value, n)`
    Upgrade(i32),
    /// `min(value, n)`
    Downgrade(i32),
    /// `n`
    Override(i32),
}

impl AdjustmentMode {
    pub fn apply(self, current: i32) -> i32 {
        match self {
            AdjustmentMode::Add(n) => current.saturating_add(n),
            AdjustmentMode::Subtract(n) => current.saturating_sub(n),
            AdjustmentMode::Multiply(n) => current.saturating_mul(n),
            AdjustmentMode::Upgrade(n) => current.max(n),
            AdjustmentMode::Downgrade(n) => current.min(n),
            AdjustmentMode::Override(n) => n,
        }
    }
}

// ============================================================================
// Modifier Adjustment
// ============================================================================

/// A predicate-gated rewrite of a modifier.
///
/// The predicate is tested against the evaluation context merged with the
/// target modifier's own roll options (see
/// [`Modifier::get_roll_options`](crate::Modifier::get_roll_options)), so an
/// adjustment can target e.g. `"penalty:type:status"`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ModifierAdjustment {
    /// Target modifier slug. `None` matches every modifier of the selector group.
    pub slug: Option<String>,
    pub predicate: Predicate,
    /// Label applied when this adjustment is the last one to change the value.
    pub relabel: Option<String>,
    /// Suppression is terminal: no other adjustment runs for the modifier.
    pub suppress: bool,
    pub mode: Option<AdjustmentMode>,
    pub damage_type: Option<DamageType>,
}

impl ModifierAdjustment {
    /// An adjustment that matches every modifier of its selector group.
    pub fn new() -> Self {
        Self::default()
    }

    /// An adjustment that only matches the modifier with `slug`.
    pub fn for_slug(slug: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn when(mut self, predicate: Predicate) -> Self {
        self.predicate = predicate;
        self
    }

    #[must_use]
    pub fn suppress(mut self) -> Self {
        self.suppress = true;
        self
    }

    #[must_use]
    pub fn value(mut self, mode: AdjustmentMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn relabel(mut self, label: impl Into<String>) -> Self {
        self.relabel = Some(label.into());
        self
    }

    #[must_use]
    pub fn damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = Some(damage_type);
        self
    }

    /// Returns `true` if this adjustment targets the modifier with `slug`.
    pub fn matches_slug(&self, slug: &str) -> bool {
        self.slug.as_deref().is_none_or(|target| target == slug)
    }

    pub fn test(&self, options: &RollOptions) -> bool {
        self.predicate.test(options)
    }
}

// ============================================================================
// Adjustment Pass
// ============================================================================

/// Apply every modifier's adjustments for one context.
///
/// Modifiers are visited in descending order of `|value|`; ties keep their
/// original order. For each modifier, the adjustments whose slug matches and
/// whose predicate holds on `options ∪ modifier roll options` are collected:
///
/// - any suppressing match ignores the modifier and ends processing for it
/// - value rewrites fold left to right; the relabel of the last adjustment
///   that actually changed the value wins
/// - damage type rewrites fold left to right; the last one wins
pub fn adjust_modifiers(modifiers: &mut [EvaluatedModifier], options: &RollOptions) {
    // Each modifier folds only its own adjustments; the visit order fixes the
    // sequence of trace output and nothing else
    let mut order: Vec<usize> = (0..modifiers.len()).collect();
    order.sort_by_key(|&index| Reverse(modifiers[index].value.unsigned_abs()));

    for index in order {
        let EvaluatedModifier {
            definition,
            label,
            value,
            damage_type,
            ignored,
            ..
        } = &mut modifiers[index];

        let context = options.union(&definition.get_roll_options());
        let matched: Vec<&ModifierAdjustment> = definition
            .adjustments()
            .iter()
            .filter(|adjustment| adjustment.matches_slug(definition.slug()))
            .filter(|adjustment| adjustment.test(&context))
            .collect();

        if matched.iter().any(|adjustment| adjustment.suppress) {
            tracing::trace!("modifier {} suppressed by adjustment", definition.slug());
            *ignored = true;
            continue;
        }

        let mut relabel: Option<&str> = None;
        for adjustment in &matched {
            let Some(mode) = adjustment.mode else {
                continue;
            };
            let adjusted = mode.apply(*value);
            if adjusted != *value {
                tracing::trace!(
                    "modifier {} adjusted {} -> {} ({:?})",
                    definition.slug(),
                    value,
                    adjusted,
                    mode
                );
                *value = adjusted;
                relabel = adjustment.relabel.as_deref();
            }
        }

        if let Some(new_type) = matched.iter().rev().find_map(|adjustment| adjustment.damage_type) {
            *damage_type = Some(new_type);
        }

        if let Some(new_label) = relabel {
            *label = new_label.to_owned();
        }
    }
}

// ============================================================================
// Adjustment Registry
// ============================================================================

/// Adjustments collected per selector by a rules pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AdjustmentRegistry {
    by_selector: BTreeMap<String, Vec<ModifierAdjustment>>,
}

impl AdjustmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, selector: impl Into<String>, adjustment: ModifierAdjustment) {
        self.by_selector
            .entry(selector.into())
            .or_default()
            .push(adjustment);
    }

    pub fn get(&self, selector: &str) -> &[ModifierAdjustment] {
        self.by_selector
            .get(selector)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_selector.is_empty()
    }
}

/// Collect the adjustments registered under any of `selectors` that target
/// the modifier `slug` (or every modifier).
pub fn extract_modifier_adjustments(
    registry: &AdjustmentRegistry,
    selectors: &[&str],
    slug: &str,
) -> Vec<ModifierAdjustment> {
    selectors
        .iter()
        .flat_map(|selector| registry.get(selector))
        .filter(|adjustment| adjustment.matches_slug(slug))
        .cloned()
        .collect()
}
