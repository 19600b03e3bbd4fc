//! Stacking engine: decide which modifiers count and strike the total.
//!
//! # Rules
//!
//! 1. **Ability exclusivity** (global): only one ability-type contribution
//!    applies to a statistic. The first forced one wins, otherwise the
//!    largest; every other ability modifier becomes ignored.
//! 2. **Untyped** contributions always stack.
//! 3. **Typed bonuses** (value ≥ 0): only the highest of each type applies.
//! 4. **Typed penalties** (value < 0): only the lowest of each type applies.
//!
//! Within a group a forced modifier beats an unforced one regardless of
//! magnitude. Equal candidates keep the incumbent, so the first modifier in
//! input order wins a tie.
//!
//! The pass is linear: when a later modifier displaces the group's incumbent,
//! the running total is corrected by the difference instead of re-summing.

use std::collections::BTreeMap;

use crate::modifier::{EvaluatedModifier, ModifierType};

/// Which end of a group wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StackingGroup {
    HighestBonus,
    LowestPenalty,
}

impl StackingGroup {
    fn prefers(self, challenger: &EvaluatedModifier, incumbent: &EvaluatedModifier) -> bool {
        match (challenger.force(), incumbent.force()) {
            (true, false) => true,
            (false, true) => false,
            _ => match self {
                StackingGroup::HighestBonus => challenger.value() > incumbent.value(),
                StackingGroup::LowestPenalty => challenger.value() < incumbent.value(),
            },
        }
    }
}

/// Winning modifier (by index) of each type within one group.
type BestByType = BTreeMap<ModifierType, usize>;

/// Apply the stacking rules and return the total.
///
/// Sets `enabled` on every modifier, and `ignored` on ability modifiers that
/// lose the ability selection. Modifiers already ignored contribute nothing.
pub fn apply_stacking_rules(modifiers: &mut [EvaluatedModifier]) -> i32 {
    select_best_ability(modifiers);

    let mut highest_bonus = BestByType::new();
    let mut lowest_penalty = BestByType::new();
    let mut total: i32 = 0;

    for index in 0..modifiers.len() {
        if modifiers[index].ignored {
            modifiers[index].enabled = false;
            continue;
        }

        let delta = if modifiers[index].modifier_type().always_stacks() {
            modifiers[index].enabled = true;
            modifiers[index].value
        } else if modifiers[index].value < 0 {
            apply_stacking(
                &mut lowest_penalty,
                modifiers,
                index,
                StackingGroup::LowestPenalty,
            )
        } else {
            apply_stacking(
                &mut highest_bonus,
                modifiers,
                index,
                StackingGroup::HighestBonus,
            )
        };
        total = total.saturating_add(delta);
    }

    tracing::debug!(
        "stacking: {} of {} modifiers enabled, total {}",
        modifiers.iter().filter(|m| m.enabled).count(),
        modifiers.len(),
        total
    );
    total
}

/// Compare `modifiers[index]` against its group's incumbent and return the
/// change to the running total.
fn apply_stacking(
    best: &mut BestByType,
    modifiers: &mut [EvaluatedModifier],
    index: usize,
    group: StackingGroup,
) -> i32 {
    let modifier_type = modifiers[index].modifier_type();

    match best.get(&modifier_type).copied() {
        None => {
            modifiers[index].enabled = true;
            best.insert(modifier_type, index);
            modifiers[index].value
        }
        Some(incumbent) if group.prefers(&modifiers[index], &modifiers[incumbent]) => {
            tracing::debug!(
                "stacking: {} replaces {} as best {} ({:?})",
                modifiers[index].slug(),
                modifiers[incumbent].slug(),
                modifier_type,
                group
            );
            modifiers[incumbent].enabled = false;
            modifiers[index].enabled = true;
            best.insert(modifier_type, index);
            modifiers[index].value - modifiers[incumbent].value
        }
        Some(_) => {
            modifiers[index].enabled = false;
            0
        }
    }
}

/// Keep exactly one non-ignored ability modifier; ignore the rest.
fn select_best_ability(modifiers: &mut [EvaluatedModifier]) {
    let candidates: Vec<usize> = modifiers
        .iter()
        .enumerate()
        .filter(|(_, m)| m.modifier_type() == ModifierType::Ability && !m.ignored)
        .map(|(index, _)| index)
        .collect();

    let best = candidates.iter().copied().reduce(|best, next| {
        let (current, challenger) = (&modifiers[best], &modifiers[next]);
        if current.force() {
            best
        } else if challenger.force() || challenger.value > current.value {
            next
        } else {
            best
        }
    });

    for index in candidates {
        if Some(index) != best {
            modifiers[index].ignored = true;
        }
    }
}
