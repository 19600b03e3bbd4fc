//! Read-only projection of a modifier evaluated against one context.

use super::definition::{Modifier, format_signed};
use super::types::{Ability, Critical, DamageCategory, DamageType, ModifierKind, ModifierType};

/// A [`Modifier`] as it stands after testing, adjustment and stacking for one
/// context.
///
/// The projection owns a copy of its definition, so evaluating the same
/// modifier against two contexts yields two independent projections and the
/// definition itself is never touched.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedModifier {
    pub(crate) definition: Modifier,
    pub(crate) label: String,
    pub(crate) value: i32,
    pub(crate) damage_type: Option<DamageType>,
    pub(crate) enabled: bool,
    pub(crate) ignored: bool,
}

impl EvaluatedModifier {
    pub(crate) fn from_definition(definition: Modifier) -> Self {
        Self {
            label: definition.label().to_owned(),
            value: definition.value(),
            damage_type: definition.damage_type(),
            enabled: !definition.ignored(),
            ignored: definition.ignored(),
            definition,
        }
    }

    /// The canonical definition this projection was produced from.
    pub fn definition(&self) -> &Modifier {
        &self.definition
    }

    pub fn slug(&self) -> &str {
        self.definition.slug()
    }

    /// Label after any relabeling adjustment.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Value after adjustments.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Value before adjustments.
    pub fn base_value(&self) -> i32 {
        self.definition.value()
    }

    pub fn signed_value(&self) -> String {
        format_signed(self.value, self.kind())
    }

    pub fn modifier_type(&self) -> ModifierType {
        self.definition.modifier_type()
    }

    /// Kind is fixed at construction and survives adjustments.
    pub fn kind(&self) -> ModifierKind {
        self.definition.kind()
    }

    pub fn ability(&self) -> Option<Ability> {
        self.definition.ability()
    }

    pub fn force(&self) -> bool {
        self.definition.force()
    }

    /// Damage type after adjustments.
    pub fn damage_type(&self) -> Option<DamageType> {
        self.damage_type
    }

    pub fn damage_category(&self) -> Option<DamageCategory> {
        self.definition.damage_category()
    }

    pub fn critical(&self) -> Critical {
        self.definition.critical()
    }

    /// Whether this modifier contributes to the total.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Whether this modifier was excluded before stacking: by its predicate,
    /// a suppressing adjustment, losing the ability selection, or its initial
    /// state.
    pub fn ignored(&self) -> bool {
        self.ignored
    }

    /// `"{label} {signed value}"`, as shown in a breakdown.
    pub fn breakdown_entry(&self) -> String {
        format!("{} {}", self.label, self.signed_value())
    }
}
