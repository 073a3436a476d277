//! # Hajb Rule Table
//!
//! Blocking (hajb hirman) is data: a map from a blocking heir to the heirs it excludes.
//! The engine never hard-codes who blocks whom; it asks a [`RuleTable`]. Multi-hop
//! exclusions must be spelled out in the table itself, the engine does not compute a
//! transitive closure.

use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumIter, EnumString};

use crate::heirs::HeirKind;

/// Islamic school of thought (Madhab).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
    Serialize, Deserialize, JsonSchema, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Madhab {
    #[default]
    Syafii,
    Hanafi,
    Maliki,
    Hanbali,
}

impl Madhab {
    /// The blocking table used for this madhab.
    ///
    /// Only the Syafi'i table is modelled; the other schools share it until their own
    /// tables are supplied through `FaraidhConfig`.
    pub fn default_table(&self) -> &'static HajbTable {
        &SYAFII_TABLE
    }
}

/// The capability the allocation engine needs from a madhab.
pub trait RuleTable: Send + Sync {
    /// Heirs excluded by the presence of `heir`.
    fn blocks(&self, heir: HeirKind) -> &[HeirKind];

    /// Whether a fixed-share heir takes part in radd (return of residue).
    fn is_residue_eligible(&self, heir: HeirKind) -> bool;

    fn madhab(&self) -> Madhab {
        Madhab::default()
    }
}

/// Blocking rules keyed by the blocking heir.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct HajbTable {
    rules: BTreeMap<HeirKind, Vec<HeirKind>>,
}

impl HajbTable {
    pub fn new(rules: BTreeMap<HeirKind, Vec<HeirKind>>) -> Self {
        Self { rules }
    }

    pub fn empty() -> Self {
        Self { rules: BTreeMap::new() }
    }

    /// Adds `blocked` to the set excluded by `blocker`.
    pub fn with_rule(mut self, blocker: HeirKind, blocked: &[HeirKind]) -> Self {
        let entry = self.rules.entry(blocker).or_default();
        for b in blocked {
            if !entry.contains(b) {
                entry.push(*b);
            }
        }
        self
    }

    pub fn blocked_by(&self, blocker: HeirKind) -> &[HeirKind] {
        self.rules.get(&blocker).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rules(&self) -> impl Iterator<Item = (HeirKind, &[HeirKind])> + '_ {
        self.rules.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

impl Default for HajbTable {
    fn default() -> Self {
        SYAFII_TABLE.clone()
    }
}

/// Fixed-share heirs that take part in radd under the default rules. Spouses are absent.
const RADD_ELIGIBLE: &[HeirKind] = &[
    HeirKind::Mother,
    HeirKind::PaternalGrandmother,
    HeirKind::MaternalGrandmother,
    HeirKind::Daughter,
    HeirKind::SonsDaughter,
    HeirKind::FullSister,
    HeirKind::PaternalHalfSister,
    HeirKind::MaternalHalfBrother,
    HeirKind::MaternalHalfSister,
];

/// Default residue-return predicate: never a spouse, otherwise the listed fard heirs.
pub fn is_residue_eligible(heir: HeirKind, _madhab: Madhab) -> bool {
    !heir.is_spouse() && RADD_ELIGIBLE.contains(&heir)
}

/// The Syafi'i table, built once and read-only afterwards.
pub static SYAFII_TABLE: Lazy<HajbTable> = Lazy::new(|| {
    use HeirKind::*;

    let siblings = [
        FullBrother,
        FullSister,
        PaternalHalfBrother,
        PaternalHalfSister,
        MaternalHalfBrother,
        MaternalHalfSister,
    ];
    let remote_agnates = [FullBrothersSon, FullPaternalUncle, PaternalHalfUncle];
    let maternal = [MaternalHalfBrother, MaternalHalfSister];

    HajbTable::empty()
        .with_rule(Son, &[SonsSon, SonsDaughter])
        .with_rule(Son, &siblings)
        .with_rule(Son, &remote_agnates)
        .with_rule(Daughter, &[SonsSon, SonsDaughter])
        .with_rule(Daughter, &maternal)
        .with_rule(SonsSon, &siblings)
        .with_rule(SonsSon, &remote_agnates)
        .with_rule(SonsDaughter, &maternal)
        .with_rule(
            Father,
            &[
                PaternalGrandfather,
                FullBrother,
                FullSister,
                PaternalHalfBrother,
                PaternalHalfSister,
                FullPaternalUncle,
                PaternalHalfUncle,
            ],
        )
        .with_rule(Father, &maternal)
        .with_rule(Father, &[FullBrothersSon])
        .with_rule(
            PaternalGrandfather,
            &[FullBrother, FullSister, PaternalHalfBrother, PaternalHalfSister],
        )
        .with_rule(PaternalGrandfather, &maternal)
        .with_rule(PaternalGrandfather, &remote_agnates)
        .with_rule(Mother, &[PaternalGrandmother, MaternalGrandmother])
        .with_rule(FullBrother, &[PaternalHalfBrother, PaternalHalfSister, FullBrothersSon])
        .with_rule(FullBrother, &[FullPaternalUncle, PaternalHalfUncle])
        .with_rule(FullSister, &[PaternalHalfBrother, PaternalHalfSister])
        .with_rule(PaternalHalfBrother, &remote_agnates)
        .with_rule(FullBrothersSon, &[FullPaternalUncle, PaternalHalfUncle])
        .with_rule(FullPaternalUncle, &[PaternalHalfUncle])
});
