//! Construction requests for modifiers.
//!
//! Params carry raw rule data. Enum-like fields that commonly come from
//! permissive external data (`modifier_type`, `damage_type`) are kept as
//! strings here and normalized by [`Modifier::new`](crate::Modifier::new).

use roll_predicate::Predicate;

use super::adjustment::ModifierAdjustment;
use super::types::{Ability, DamageCategory};

/// Provenance of a modifier granted by an item.
///
/// Informational only. Used to synthesize roll options such as
/// `"bonus:item:slug:striking-rune"` so adjustments can target everything an
/// item (or whatever granted that item) contributes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemOrigin {
    pub item_type: String,
    pub slug: String,
    pub granter: Option<Granter>,
}

/// The item that granted an [`ItemOrigin`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Granter {
    pub item_type: String,
    pub slug: String,
}

impl ItemOrigin {
    pub fn new(item_type: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            slug: slug.into(),
            granter: None,
        }
    }

    #[must_use]
    pub fn granted_by(mut self, item_type: impl Into<String>, slug: impl Into<String>) -> Self {
        self.granter = Some(Granter {
            item_type: item_type.into(),
            slug: slug.into(),
        });
        self
    }
}

/// Raw construction request for a [`Modifier`](crate::Modifier).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ModifierParams {
    pub slug: Option<String>,
    pub label: String,
    pub modifier: i32,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub modifier_type: Option<String>,
    pub ability: Option<Ability>,
    pub adjustments: Vec<ModifierAdjustment>,
    pub force: bool,
    /// Initial ignored state, e.g. a modifier the user toggled off.
    pub ignored: bool,
    pub predicate: Predicate,
    pub damage_type: Option<String>,
    pub damage_category: Option<DamageCategory>,
    /// `None`: doubled on a critical. `Some(true)`: critical only.
    /// `Some(false)`: never doubled.
    pub critical: Option<bool>,
    pub source: Option<String>,
    pub item: Option<ItemOrigin>,
    pub custom: bool,
}

impl ModifierParams {
    pub fn new(label: impl Into<String>, modifier: i32) -> Self {
        Self {
            label: label.into(),
            modifier,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Accepts either a [`ModifierType`](crate::ModifierType) or a raw string.
    #[must_use]
    pub fn with_type(mut self, modifier_type: impl AsRef<str>) -> Self {
        self.modifier_type = Some(modifier_type.as_ref().to_owned());
        self
    }

    #[must_use]
    pub fn ability(mut self, ability: Ability) -> Self {
        self.ability = Some(ability);
        self
    }

    #[must_use]
    pub fn adjustment(mut self, adjustment: ModifierAdjustment) -> Self {
        self.adjustments.push(adjustment);
        self
    }

    #[must_use]
    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }

    #[must_use]
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    #[must_use]
    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = predicate;
        self
    }

    /// Accepts either a [`DamageType`](crate::DamageType) or a raw string.
    #[must_use]
    pub fn damage_type(mut self, damage_type: impl AsRef<str>) -> Self {
        self.damage_type = Some(damage_type.as_ref().to_owned());
        self
    }

    #[must_use]
    pub fn damage_category(mut self, category: DamageCategory) -> Self {
        self.damage_category = Some(category);
        self
    }

    #[must_use]
    pub fn critical(mut self, critical: bool) -> Self {
        self.critical = Some(critical);
        self
    }

    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn item(mut self, item: ItemOrigin) -> Self {
        self.item = Some(item);
        self
    }

    #[must_use]
    pub fn custom(mut self) -> Self {
        self.custom = true;
        self
    }
}
