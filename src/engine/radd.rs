//! Return of residue (radd).
//!
//! Runs when the fixed shares leave a residue and no residuary exists. The residue goes
//! back to the eligible fixed-share heirs in proportion to their siham: each eligible
//! fraction's numerator once all of them are raised to their common denominator (the
//! lcm of the eligible denominators). With a daughter at 1/2 and a mother at 1/6 the
//! weights are 3 and 1, not the raw numerators 1 and 1.

use num_bigint::BigInt;
use tracing::debug;

use super::apportion::apportion;
use crate::fraction::{common_denominator, to_siham, Fraction};
use crate::madhab::RuleTable;
use crate::types::{CalculationStep, FaraidhError, HeirResult, Operation, ShareCategory};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaddOutcome {
    /// The returned amount per heir. Already added to the fixed shares.
    pub results: Vec<HeirResult>,
    pub steps: Vec<CalculationStep>,
}

/// Indices of the fixed shares that take part in radd, or `None` when radd does not apply.
fn participants<R: RuleTable + ?Sized>(fard: &[HeirResult], rules: &R) -> Option<Vec<usize>> {
    if fard.is_empty() || fard.iter().all(|r| r.heir.is_maternal_sibling()) {
        return None;
    }

    let eligible: Vec<usize> = (0..fard.len())
        .filter(|&i| rules.is_residue_eligible(fard[i].heir))
        .collect();
    if !eligible.is_empty() {
        return Some(eligible);
    }

    // A spouse with no other radd-eligible heir takes the residue back.
    let spouses: Vec<usize> = (0..fard.len()).filter(|&i| fard[i].heir.is_spouse()).collect();
    if spouses.is_empty() { None } else { Some(spouses) }
}

/// Folds `residue` into the fixed shares. Returns `None` (and leaves `fard` untouched)
/// when nobody is eligible.
pub fn apply_radd<R: RuleTable + ?Sized>(
    fard: &mut [HeirResult],
    residue: &BigInt,
    rules: &R,
) -> Result<Option<RaddOutcome>, FaraidhError> {
    let Some(indices) = participants(fard, rules) else {
        debug!("no radd participant, residue stays undistributed");
        return Ok(None);
    };

    let surplus = Fraction::one().sub(&Fraction::sum(fard.iter().map(|r| &r.portion))?)?;
    let portions: Vec<Fraction> = indices.iter().map(|&i| fard[i].portion.clone()).collect();
    let asl = common_denominator(&portions);
    let siham = to_siham(&portions, &asl);
    let total: BigInt = siham.iter().sum();
    let amounts = apportion(residue, &siham)?;

    let mut outcome = RaddOutcome::default();
    for ((&i, s), amount) in indices.iter().zip(&siham).zip(amounts) {
        let weight = Fraction::new(s.clone(), total.clone())?;
        let result = &mut fard[i];

        result.portion = result.portion.add(&surplus.mul(&weight)?)?;
        result.set_total(&result.total_share + &amount);

        debug!(heir = %result.heir, %amount, "radd");
        outcome
            .steps
            .push(CalculationStep::share(Operation::Radd, result.heir, weight.clone(), amount.clone()));
        outcome
            .results
            .push(HeirResult::new(result.heir, result.count, amount, weight, ShareCategory::Radd));
    }
    Ok(Some(outcome))
}
