//! Proportional reduction (awl).
//!
//! When the fixed shares add up to more than the estate, each heir keeps its siham
//! (units of the common denominator) but the base is raised to the total siham, so
//! every share shrinks by the same factor.

use num_bigint::BigInt;
use tracing::debug;

use super::apportion::apportion;
use crate::fraction::{common_denominator, to_siham, Fraction};
use crate::types::{CalculationStep, FaraidhError, HeirResult, Operation};

#[derive(Debug, Clone, PartialEq)]
pub struct AwlOutcome {
    /// Factor applied to every fixed share, original base over raised base.
    pub ratio: Fraction,
    /// Original common denominator.
    pub asl: BigInt,
    /// Raised base: the total siham.
    pub raised_asl: BigInt,
    pub steps: Vec<CalculationStep>,
}

/// Re-splits `net` over the results by their siham and rewrites their portions.
///
/// Returns `(asl, total_siham)`. The last result absorbs the truncation slack.
fn resplit(results: &mut [HeirResult], net: &BigInt) -> Result<(BigInt, BigInt), FaraidhError> {
    let portions: Vec<Fraction> = results.iter().map(|r| r.portion.clone()).collect();
    let asl = common_denominator(&portions);
    let siham = to_siham(&portions, &asl);
    let total: BigInt = siham.iter().sum();

    let amounts = apportion(net, &siham)?;
    for ((result, s), amount) in results.iter_mut().zip(&siham).zip(amounts) {
        result.portion = Fraction::new(s.clone(), total.clone())?;
        result.set_total(amount);
    }
    Ok((asl, total))
}

pub fn apply_awl(results: &mut [HeirResult], net: &BigInt) -> Result<AwlOutcome, FaraidhError> {
    let (asl, raised_asl) = resplit(results, net)?;
    let ratio = Fraction::new(asl.clone(), raised_asl.clone())?;
    debug!(%asl, %raised_asl, %ratio, "awl applied");

    let mut steps = vec![CalculationStep::info(format!(
        "Awl: fixed shares exceed the estate, base raised from {} to {}",
        asl, raised_asl
    ))];
    steps.extend(results.iter().map(|r| {
        CalculationStep::share(Operation::Awl, r.heir, r.portion.clone(), r.total_share.clone())
    }));

    Ok(AwlOutcome { ratio, asl, raised_asl, steps })
}

/// Settles fixed shares that add up to exactly one, so truncation slack stays with the
/// fixed-share heirs instead of surfacing as residue.
pub fn settle_exact(results: &mut [HeirResult], net: &BigInt) -> Result<(), FaraidhError> {
    resplit(results, net).map(|_| ())
}
