//! Residuaries (asabah).
//!
//! Within the residuary group a male counts as two shares and a female as one. The
//! group, by the first case that applies:
//!
//! 1. sons, with daughters
//! 2. son's sons
//! 3. father, when there is no descendant (this covers Gharrawain)
//! 4. paternal grandfather, when there is no father and no descendant
//! 5. full brothers with full sisters, when there is no father, grandfather or
//!    descendant
//!
//! Nobody else takes the residue here; what is left goes to radd or stays undistributed.

use num_bigint::BigInt;
use tracing::debug;

use super::apportion::apportion;
use super::fard::Composition;
use crate::fraction::Fraction;
use crate::heirs::{HeirCounts, HeirKind};
use crate::types::{CalculationStep, FaraidhError, HeirResult, Operation, ShareCategory};

/// A member of the residuary group: category, head-count and weight.
type Member = (HeirKind, i64, i64);

/// The residuary group for the surviving (unblocked) family, or empty.
pub fn residuary_group(e: &HeirCounts, comp: &Composition) -> Vec<Member> {
    let males = |kind: HeirKind| (kind, e.get(kind), 2 * e.get(kind));

    if e.son > 0 {
        let mut group = vec![males(HeirKind::Son)];
        if e.daughter > 0 {
            group.push((HeirKind::Daughter, e.daughter, e.daughter));
        }
        return group;
    }
    if e.sons_son > 0 {
        return vec![males(HeirKind::SonsSon)];
    }
    if comp.has_descendant {
        return Vec::new();
    }
    if e.father > 0 {
        return vec![(HeirKind::Father, e.father, 1)];
    }
    if e.paternal_grandfather > 0 {
        return vec![(HeirKind::PaternalGrandfather, e.paternal_grandfather, 1)];
    }
    if e.full_brother > 0 {
        let mut group = vec![males(HeirKind::FullBrother)];
        if e.full_sister > 0 {
            group.push((HeirKind::FullSister, e.full_sister, e.full_sister));
        }
        return group;
    }
    Vec::new()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AsabahOutcome {
    pub results: Vec<HeirResult>,
    pub steps: Vec<CalculationStep>,
}

/// Splits `residue` over the residuary group.
///
/// `residue_portion` is the part of the net estate the fixed shares left; each
/// residuary's portion is its weight's slice of it.
pub fn assign_asabah(
    e: &HeirCounts,
    comp: &Composition,
    residue: &BigInt,
    residue_portion: &Fraction,
) -> Result<AsabahOutcome, FaraidhError> {
    let group = residuary_group(e, comp);
    if group.is_empty() {
        return Ok(AsabahOutcome::default());
    }

    let weights: Vec<BigInt> = group.iter().map(|(_, _, w)| BigInt::from(*w)).collect();
    let total_weight: i64 = group.iter().map(|(_, _, w)| w).sum();
    let amounts = apportion(residue, &weights)?;

    let mut outcome = AsabahOutcome::default();
    for ((heir, count, weight), amount) in group.into_iter().zip(amounts) {
        let portion = residue_portion.mul(&Fraction::new(weight, total_weight)?)?;
        debug!(%heir, count, weight, %amount, "asabah");
        outcome
            .steps
            .push(CalculationStep::share(Operation::Asabah, heir, portion.clone(), amount.clone()));
        outcome
            .results
            .push(HeirResult::new(heir, count, amount, portion, ShareCategory::Asabah));
    }
    Ok(outcome)
}
