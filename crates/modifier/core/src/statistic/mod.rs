//! Statistic totals: an ordered, de-duplicated modifier roster per statistic.
//!
//! A [`StatisticModifier`] owns the modifiers contributing to one statistic
//! (an attack roll, a saving throw, a skill) and caches the stacked total and
//! its breakdown for the last context it was evaluated against.
//! A [`CheckModifier`] is the per-roll variant: the statistic's modifiers plus
//! situational extras, evaluated once against the roll's context.

pub mod check;

pub use check::CheckModifier;

use roll_predicate::RollOptions;

use crate::config::EngineConfig;
use crate::modifier::{EvaluatedModifier, Modifier, adjust_modifiers};
use crate::stacking::apply_stacking_rules;

/// Where a new modifier enters the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Insert {
    Front,
    Back,
}

/// The modifiers of one statistic and their cached total.
///
/// # Invariants
///
/// - At most one modifier per slug. A duplicate replaces the incumbent (in
///   place) only when its absolute value is strictly larger.
/// - `total_modifier` is the stacked sum of the roster evaluated against the
///   last supplied context, and `breakdown` lists exactly the enabled
///   modifiers in roster order.
#[derive(Clone, Debug, PartialEq)]
pub struct StatisticModifier {
    slug: String,
    label: String,
    modifiers: Vec<Modifier>,
    evaluated: Vec<EvaluatedModifier>,
    roll_options: Option<RollOptions>,
    total_modifier: i32,
    breakdown: String,
    separator: String,
}

impl StatisticModifier {
    /// Build a statistic from `modifiers`, de-duplicating by slug, and compute
    /// its total. With `roll_options`, every modifier is tested and adjusted
    /// against that context.
    pub fn new(
        slug: impl Into<String>,
        modifiers: impl IntoIterator<Item = Modifier>,
        roll_options: Option<&RollOptions>,
    ) -> Self {
        let slug = slug.into();
        let mut roster = Vec::new();
        for modifier in modifiers {
            merge(&mut roster, modifier, Insert::Back);
        }

        let mut statistic = Self {
            label: slug.clone(),
            slug,
            modifiers: roster,
            evaluated: Vec::new(),
            roll_options: None,
            total_modifier: 0,
            breakdown: String::new(),
            separator: EngineConfig::DEFAULT_BREAKDOWN_SEPARATOR.to_owned(),
        };
        statistic.calculate_total(roll_options);
        statistic
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Adopt `config`'s breakdown separator and rebuild the breakdown.
    #[must_use]
    pub fn with_config(self, config: &EngineConfig) -> Self {
        self.with_separator(&config.breakdown_separator)
    }

    fn with_separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_owned();
        self.breakdown = self.breakdown_with(separator);
        self
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The roster, in order.
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// The roster as evaluated by the last [`calculate_total`](Self::calculate_total).
    pub fn evaluated(&self) -> &[EvaluatedModifier] {
        &self.evaluated
    }

    /// Context of the last evaluation, if one was ever supplied.
    pub fn roll_options(&self) -> Option<&RollOptions> {
        self.roll_options.as_ref()
    }

    pub fn total_modifier(&self) -> i32 {
        self.total_modifier
    }

    /// Enabled modifiers as `"{label} {signed value}"`, joined for display.
    pub fn breakdown(&self) -> &str {
        &self.breakdown
    }

    /// Separator placed between breakdown entries.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn breakdown_entries(&self) -> Vec<String> {
        self.evaluated
            .iter()
            .filter(|modifier| modifier.enabled())
            .map(EvaluatedModifier::breakdown_entry)
            .collect()
    }

    pub fn breakdown_with(&self, separator: &str) -> String {
        self.breakdown_entries().join(separator)
    }

    /// Add a modifier at the end of the roster. Returns the roster length.
    pub fn push(&mut self, modifier: Modifier) -> usize {
        if merge(&mut self.modifiers, modifier, Insert::Back) {
            self.calculate_total(None);
        }
        self.modifiers.len()
    }

    /// Add a modifier at the front of the roster. Returns the roster length.
    pub fn unshift(&mut self, modifier: Modifier) -> usize {
        if merge(&mut self.modifiers, modifier, Insert::Front) {
            self.calculate_total(None);
        }
        self.modifiers.len()
    }

    /// Remove the modifier with `slug`. Returns `true` if one was removed.
    pub fn delete(&mut self, slug: &str) -> bool {
        let Some(position) = self.modifiers.iter().position(|m| m.slug() == slug) else {
            return false;
        };
        self.modifiers.remove(position);
        self.calculate_total(None);
        true
    }

    /// Remove `modifier` if the roster holds exactly this modifier.
    pub fn delete_modifier(&mut self, modifier: &Modifier) -> bool {
        let Some(position) = self.modifiers.iter().position(|m| m == modifier) else {
            return false;
        };
        self.modifiers.remove(position);
        self.calculate_total(None);
        true
    }

    /// Re-evaluate the roster and refresh the cached total and breakdown.
    ///
    /// A supplied context replaces the stored one. Whenever a context is
    /// known, every modifier is tested against it and adjusted before
    /// stacking; otherwise modifiers keep their initial state.
    pub fn calculate_total(&mut self, roll_options: Option<&RollOptions>) -> i32 {
        if let Some(options) = roll_options {
            self.roll_options = Some(options.clone());
        }

        let mut evaluated: Vec<EvaluatedModifier> = match &self.roll_options {
            Some(options) => {
                let mut evaluated: Vec<_> =
                    self.modifiers.iter().map(|m| m.tested(options)).collect();
                adjust_modifiers(&mut evaluated, options);
                evaluated
            }
            None => self.modifiers.iter().map(Modifier::project).collect(),
        };

        self.total_modifier = apply_stacking_rules(&mut evaluated);
        self.evaluated = evaluated;
        self.breakdown = self.breakdown_with(&self.separator);

        tracing::debug!(
            "statistic {}: total {} [{}]",
            self.slug,
            self.total_modifier,
            self.breakdown
        );
        self.total_modifier
    }
}

/// Insert `modifier` into `roster`, merging by slug. Returns `true` if the
/// roster changed.
fn merge(roster: &mut Vec<Modifier>, modifier: Modifier, insert: Insert) -> bool {
    match roster.iter().position(|m| m.slug() == modifier.slug()) {
        Some(position) => {
            if modifier.value().unsigned_abs() > roster[position].value().unsigned_abs() {
                tracing::debug!(
                    "modifier {} replaced: {} -> {}",
                    modifier.slug(),
                    roster[position].value(),
                    modifier.value()
                );
                roster[position] = modifier;
                true
            } else {
                false
            }
        }
        None => {
            match insert {
                Insert::Front => roster.insert(0, modifier),
                Insert::Back => roster.push(modifier),
            }
            true
        }
    }
}
