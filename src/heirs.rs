//! # Heir Categories
//!
//! The twenty categories recognised by the engine, from spouses down to paternal uncles.
//! Declaration order is significant: it is the order blocked heirs are reported in and
//! the order `HeirCounts::iter` walks.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, AsRefStr, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HeirKind {
    Husband,
    Wife,
    Father,
    Mother,
    /// Jadd sahih: father's father.
    PaternalGrandfather,
    /// Father's mother.
    PaternalGrandmother,
    /// Mother's mother.
    MaternalGrandmother,
    Son,
    Daughter,
    SonsSon,
    SonsDaughter,
    FullBrother,
    FullSister,
    PaternalHalfBrother,
    PaternalHalfSister,
    MaternalHalfBrother,
    MaternalHalfSister,
    /// Son of a full brother.
    FullBrothersSon,
    /// Father's full brother.
    FullPaternalUncle,
    /// Father's paternal half-brother.
    PaternalHalfUncle,
}

impl HeirKind {
    pub fn is_spouse(&self) -> bool {
        matches!(self, HeirKind::Husband | HeirKind::Wife)
    }

    pub fn is_maternal_sibling(&self) -> bool {
        matches!(self, HeirKind::MaternalHalfBrother | HeirKind::MaternalHalfSister)
    }

    /// Categories that can only ever hold one person.
    pub fn is_single_slot(&self) -> bool {
        matches!(
            self,
            HeirKind::Husband
                | HeirKind::Father
                | HeirKind::Mother
                | HeirKind::PaternalGrandfather
                | HeirKind::PaternalGrandmother
                | HeirKind::MaternalGrandmother
        )
    }

    /// Upper bound on the head-count of this category, if any.
    pub fn max_count(&self) -> Option<i64> {
        match self {
            HeirKind::Wife => Some(4),
            k if k.is_single_slot() => Some(1),
            _ => None,
        }
    }

    /// Fluent message id of the display label.
    pub fn label_key(&self) -> String {
        format!("heir-{}", self.as_ref().replace('_', "-"))
    }
}

/// Head-count per heir category, as supplied by the caller.
///
/// Counts are signed so that a malformed request (e.g. `-1` sons read from JSON) survives
/// deserialisation and is reported by validation instead of being rejected opaquely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HeirCounts {
    pub husband: i64,
    pub wife: i64,
    pub father: i64,
    pub mother: i64,
    pub paternal_grandfather: i64,
    pub paternal_grandmother: i64,
    pub maternal_grandmother: i64,
    pub son: i64,
    pub daughter: i64,
    pub sons_son: i64,
    pub sons_daughter: i64,
    pub full_brother: i64,
    pub full_sister: i64,
    pub paternal_half_brother: i64,
    pub paternal_half_sister: i64,
    pub maternal_half_brother: i64,
    pub maternal_half_sister: i64,
    pub full_brothers_son: i64,
    pub full_paternal_uncle: i64,
    pub paternal_half_uncle: i64,
}

impl HeirCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: HeirKind) -> i64 {
        match kind {
            HeirKind::Husband => self.husband,
            HeirKind::Wife => self.wife,
            HeirKind::Father => self.father,
            HeirKind::Mother => self.mother,
            HeirKind::PaternalGrandfather => self.paternal_grandfather,
            HeirKind::PaternalGrandmother => self.paternal_grandmother,
            HeirKind::MaternalGrandmother => self.maternal_grandmother,
            HeirKind::Son => self.son,
            HeirKind::Daughter => self.daughter,
            HeirKind::SonsSon => self.sons_son,
            HeirKind::SonsDaughter => self.sons_daughter,
            HeirKind::FullBrother => self.full_brother,
            HeirKind::FullSister => self.full_sister,
            HeirKind::PaternalHalfBrother => self.paternal_half_brother,
            HeirKind::PaternalHalfSister => self.paternal_half_sister,
            HeirKind::MaternalHalfBrother => self.maternal_half_brother,
            HeirKind::MaternalHalfSister => self.maternal_half_sister,
            HeirKind::FullBrothersSon => self.full_brothers_son,
            HeirKind::FullPaternalUncle => self.full_paternal_uncle,
            HeirKind::PaternalHalfUncle => self.paternal_half_uncle,
        }
    }

    pub fn set(&mut self, kind: HeirKind, count: i64) {
        let slot = match kind {
            HeirKind::Husband => &mut self.husband,
            HeirKind::Wife => &mut self.wife,
            HeirKind::Father => &mut self.father,
            HeirKind::Mother => &mut self.mother,
            HeirKind::PaternalGrandfather => &mut self.paternal_grandfather,
            HeirKind::PaternalGrandmother => &mut self.paternal_grandmother,
            HeirKind::MaternalGrandmother => &mut self.maternal_grandmother,
            HeirKind::Son => &mut self.son,
            HeirKind::Daughter => &mut self.daughter,
            HeirKind::SonsSon => &mut self.sons_son,
            HeirKind::SonsDaughter => &mut self.sons_daughter,
            HeirKind::FullBrother => &mut self.full_brother,
            HeirKind::FullSister => &mut self.full_sister,
            HeirKind::PaternalHalfBrother => &mut self.paternal_half_brother,
            HeirKind::PaternalHalfSister => &mut self.paternal_half_sister,
            HeirKind::MaternalHalfBrother => &mut self.maternal_half_brother,
            HeirKind::MaternalHalfSister => &mut self.maternal_half_sister,
            HeirKind::FullBrothersSon => &mut self.full_brothers_son,
            HeirKind::FullPaternalUncle => &mut self.full_paternal_uncle,
            HeirKind::PaternalHalfUncle => &mut self.paternal_half_uncle,
        };
        *slot = count;
    }

    /// Fluent setter: `HeirCounts::new().with(HeirKind::Son, 2)`.
    pub fn with(mut self, kind: HeirKind, count: i64) -> Self {
        self.set(kind, count);
        self
    }

    /// Every category with its count, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (HeirKind, i64)> + '_ {
        HeirKind::iter().map(move |k| (k, self.get(k)))
    }

    pub fn present(&self, kind: HeirKind) -> bool {
        self.get(kind) > 0
    }

    /// Any child or son's child.
    pub fn has_descendant(&self) -> bool {
        [self.son, self.daughter, self.sons_son, self.sons_daughter].iter().any(|n| *n > 0)
    }

    pub fn has_spouse(&self) -> bool {
        self.husband > 0 || self.wife > 0
    }

    /// Any sibling of any line (full, paternal or maternal).
    pub fn has_sibling(&self) -> bool {
        [
            self.full_brother,
            self.full_sister,
            self.paternal_half_brother,
            self.paternal_half_sister,
            self.maternal_half_brother,
            self.maternal_half_sister,
        ]
        .iter()
        .any(|n| *n > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, n)| n <= 0)
    }

    // Fluent setters for the common categories.

    pub fn husband(mut self, n: i64) -> Self { self.husband = n; self }
    pub fn wife(mut self, n: i64) -> Self { self.wife = n; self }
    pub fn father(mut self, n: i64) -> Self { self.father = n; self }
    pub fn mother(mut self, n: i64) -> Self { self.mother = n; self }
    pub fn son(mut self, n: i64) -> Self { self.son = n; self }
    pub fn daughter(mut self, n: i64) -> Self { self.daughter = n; self }
}
