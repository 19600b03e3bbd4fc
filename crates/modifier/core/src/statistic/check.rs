//! Per-roll statistic: baseline modifiers plus situational extras.

use std::ops::{Deref, DerefMut};

use roll_predicate::RollOptions;

use super::StatisticModifier;
use crate::modifier::Modifier;

/// A [`StatisticModifier`] built fresh for a single roll.
///
/// The base statistic's modifiers are copied, so the roll-specific
/// evaluation never touches the persistent statistic. Never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckModifier {
    statistic: StatisticModifier,
}

impl CheckModifier {
    pub fn new(
        slug: impl Into<String>,
        base: &StatisticModifier,
        extras: impl IntoIterator<Item = Modifier>,
        roll_options: &RollOptions,
    ) -> Self {
        let modifiers = base.modifiers().iter().cloned().chain(extras);
        let statistic = StatisticModifier::new(slug, modifiers, Some(roll_options))
            .with_label(base.label())
            .with_separator(base.separator());
        Self { statistic }
    }

    pub fn into_inner(self) -> StatisticModifier {
        self.statistic
    }
}

impl Deref for CheckModifier {
    type Target = StatisticModifier;

    fn deref(&self) -> &Self::Target {
        &self.statistic
    }
}

impl DerefMut for CheckModifier {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.statistic
    }
}
