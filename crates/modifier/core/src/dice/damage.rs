//! Damage formula assembly.
//!
//! Combines a weapon's or spell's base damage with dice modifiers and flat
//! modifiers into a list of typed terms, e.g. `2d8 + 4 slashing, 1d6 fire`.
//!
//! # Order
//!
//! 1. Dice modifiers are tested against the context.
//! 2. Enabled overrides rewrite the base damage in roster order.
//! 3. Flat modifiers are stacked through a [`StatisticModifier`].
//! 4. Contributions are filtered and doubled per [`Critical`] and the outcome.
//! 5. Contributions sharing a damage type and category merge into one term.

use core::fmt;

use roll_predicate::RollOptions;

use super::modifier::{DiceModifier, DieSize};
use crate::modifier::{Critical, DamageCategory, DamageType, Modifier};
use crate::statistic::StatisticModifier;

/// Unmodified damage of a strike or spell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseDamage {
    pub dice_number: u32,
    pub die_size: DieSize,
    pub damage_type: DamageType,
    pub category: Option<DamageCategory>,
}

impl BaseDamage {
    pub fn new(dice_number: u32, die_size: DieSize, damage_type: DamageType) -> Self {
        Self {
            dice_number,
            die_size,
            damage_type,
            category: None,
        }
    }

    /// Apply a dice modifier's override, if it has one.
    fn apply_override(&mut self, dice: &DiceModifier) {
        let Some(dice_override) = dice.dice_override() else {
            return;
        };
        if dice_override.upgrade {
            self.die_size = self.die_size.upgrade();
        }
        if dice_override.downgrade {
            self.die_size = self.die_size.downgrade();
        }
        if let Some(die_size) = dice_override.die_size {
            self.die_size = die_size;
        }
        if let Some(damage_type) = dice_override.damage_type {
            self.damage_type = damage_type;
        }
        if let Some(dice_number) = dice_override.dice_number {
            self.dice_number = dice_number;
        }
        tracing::debug!(
            "damage override {}: now {}{} {}",
            dice.slug(),
            self.dice_number,
            self.die_size,
            self.damage_type
        );
    }
}

/// Dice and flat damage of one damage type and category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DamageTerm {
    pub dice: Vec<(u32, DieSize)>,
    pub flat: i32,
    pub damage_type: DamageType,
    pub category: Option<DamageCategory>,
}

impl DamageTerm {
    fn new(damage_type: DamageType, category: Option<DamageCategory>) -> Self {
        Self {
            dice: Vec::new(),
            flat: 0,
            damage_type,
            category,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dice.iter().all(|(number, _)| *number == 0) && self.flat == 0
    }
}

impl fmt::Display for DamageTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote_dice = false;
        for (number, size) in self.dice.iter().filter(|(number, _)| *number > 0) {
            if wrote_dice {
                write!(f, " + ")?;
            }
            write!(f, "{number}{size}")?;
            wrote_dice = true;
        }
        match (wrote_dice, self.flat) {
            (false, flat) => write!(f, "{flat}")?,
            (true, 0) => {}
            (true, flat) if flat > 0 => write!(f, " + {flat}")?,
            (true, flat) => write!(f, " - {}", flat.unsigned_abs())?,
        }
        if let Some(category) = self.category {
            write!(f, " {category}")?;
        }
        write!(f, " {}", self.damage_type)
    }
}

/// A fully assembled damage formula for one outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageFormula {
    base: BaseDamage,
    terms: Vec<DamageTerm>,
    modifiers: StatisticModifier,
    critical: bool,
}

impl DamageFormula {
    /// Assemble the damage for one hit.
    ///
    /// `critical` selects the critical-hit outcome: critical-only
    /// contributions are included and doubling contributions are doubled.
    /// A dice modifier with an override only rewrites the base damage; it
    /// never adds dice of its own.
    pub fn build(
        base: &BaseDamage,
        dice: &[DiceModifier],
        modifiers: &[Modifier],
        options: &RollOptions,
        critical: bool,
    ) -> Self {
        let enabled_dice: Vec<&DiceModifier> = dice
            .iter()
            .filter(|d| d.evaluate(options).enabled())
            .collect();

        let mut resolved = base.clone();
        for dice in enabled_dice.iter().filter(|d| d.dice_override().is_some()) {
            resolved.apply_override(dice);
        }

        let mut terms = vec![DamageTerm::new(resolved.damage_type, resolved.category)];
        terms[0].dice.push((
            scale(resolved.dice_number, Critical::Doubles, critical),
            resolved.die_size,
        ));

        let flat = StatisticModifier::new(
            "damage",
            modifiers
                .iter()
                .filter(|m| m.critical().applies(critical))
                .cloned(),
            Some(options),
        );
        for modifier in flat.evaluated().iter().filter(|m| m.enabled()) {
            let value = if modifier.critical().doubles(critical) {
                modifier.value().saturating_mul(2)
            } else {
                modifier.value()
            };
            let term = term_for(
                &mut terms,
                modifier.damage_type().unwrap_or(resolved.damage_type),
                modifier.damage_category(),
            );
            term.flat = term.flat.saturating_add(value);
        }

        for dice in enabled_dice
            .iter()
            .filter(|d| d.dice_override().is_none() && d.critical().applies(critical))
        {
            let Some(die_size) = dice.die_size() else {
                continue;
            };
            let term = term_for(
                &mut terms,
                dice.damage_type().unwrap_or(resolved.damage_type),
                dice.category(),
            );
            term.dice
                .push((scale(dice.dice_number(), dice.critical(), critical), die_size));
        }

        let base_term = terms.remove(0);
        terms.retain(|term| !term.is_empty());
        terms.insert(0, base_term);

        Self {
            base: resolved,
            terms,
            modifiers: flat,
            critical,
        }
    }

    /// Base damage after overrides.
    pub fn base(&self) -> &BaseDamage {
        &self.base
    }

    pub fn terms(&self) -> &[DamageTerm] {
        &self.terms
    }

    /// The stacked flat modifiers, with their breakdown.
    pub fn modifiers(&self) -> &StatisticModifier {
        &self.modifiers
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }
}

impl fmt::Display for DamageFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, term) in self.terms.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

fn scale(dice_number: u32, setting: Critical, critical: bool) -> u32 {
    if setting.doubles(critical) {
        dice_number.saturating_mul(2)
    } else {
        dice_number
    }
}

fn term_for(
    terms: &mut Vec<DamageTerm>,
    damage_type: DamageType,
    category: Option<DamageCategory>,
) -> &mut DamageTerm {
    let position = terms
        .iter()
        .position(|term| term.damage_type == damage_type && term.category == category);
    match position {
        Some(position) => &mut terms[position],
        None => {
            terms.push(DamageTerm::new(damage_type, category));
            let last = terms.len() - 1;
            &mut terms[last]
        }
    }
}
