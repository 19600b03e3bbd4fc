//! Slug normalization for labels and identifiers.

use convert_case::{Boundary, Case, Casing};

/// Convert a display label into a stable kebab-case identifier.
///
/// ```
/// # use modifier_core::sluggify;
/// assert_eq!(sluggify("Item Bonus"), "item-bonus");
/// assert_eq!(sluggify("Cleric's  Blessing!"), "clerics-blessing");
/// ```
pub fn sluggify(text: &str) -> String {
    // Apostrophes join words; any other non-alphanumeric separates them
    let words: String = text
        .chars()
        .filter(|ch| !matches!(ch, '\'' | '\u{2019}'))
        .map(|ch| if ch.is_alphanumeric() { ch } else { ' ' })
        .collect();
    words
        .with_boundaries(&[Boundary::Space])
        .to_case(Case::Kebab)
}
