//! # Allocation Engine
//!
//! One calculation is a pure function of its input and rule table:
//!
//! 1. deduct debt, then the bequest from what the debt leaves
//! 2. apply hajb
//! 3. assign fixed shares (with the Gharrawain branch)
//! 4. awl when the fixed shares exceed the estate
//! 5. otherwise asabah for any residue, then radd, then the distant-relative stage
//! 6. reconcile: every split hands its truncation slack to its last member, so
//!    `debt + bequest + Σ shares + undistributed == total_assets` holds exactly

pub mod apportion;
pub mod asabah;
pub mod awl;
pub mod dhawu;
pub mod fard;
pub mod hajb;
pub mod radd;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use tracing::{debug, debug_span, info, warn};

use crate::fraction::{common_denominator, scale, to_siham, Fraction};
use crate::input::CalculationInput;
use crate::madhab::RuleTable;
use crate::types::{
    CalculationResult, CalculationStep, CalculationSummary, DistributionMethod, FaraidhError, HeirResult,
};
use crate::validation::validate;

use self::asabah::assign_asabah;
use self::awl::{apply_awl, settle_exact};
use self::dhawu::assign_dhawu;
use self::fard::{assign_fard, Composition};
use self::hajb::apply_hajb;
use self::radd::apply_radd;

fn sum_shares<'a>(results: impl IntoIterator<Item = &'a HeirResult>) -> BigInt {
    results.into_iter().map(|r| &r.total_share).sum()
}

/// Distributes an estate.
///
/// Fails with [`FaraidhError::Validation`] carrying every violation when the input is
/// invalid; no partial result is ever returned.
pub fn calculate<R: RuleTable + ?Sized>(
    input: &CalculationInput,
    rules: &R,
) -> Result<CalculationResult, FaraidhError> {
    let errors = validate(input);
    if !errors.is_empty() {
        debug!(violations = errors.len(), "input rejected");
        return Err(FaraidhError::Validation(errors));
    }

    let madhab = input.madhab.unwrap_or_else(|| rules.madhab());
    let span = debug_span!("faraidh", %madhab, total_assets = %input.total_assets);
    let _enter = span.enter();

    let mut trace = Vec::new();

    // Deduction
    let bequest_fraction = input.bequest.reduce()?;
    let after_debt = &input.total_assets - &input.debt;
    let bequest = scale(&after_debt, &bequest_fraction)?;
    let net = &after_debt - &bequest;
    debug!(debt = %input.debt, %bequest, %net, "deductions applied");
    trace.push(CalculationStep::initial("Total assets", input.total_assets.clone()));
    trace.push(CalculationStep::subtract("Debt", input.debt.clone()));
    trace.push(CalculationStep::subtract(format!("Bequest ({})", bequest_fraction), bequest.clone()));
    trace.push(CalculationStep::result("Net estate", net.clone()));

    // Hajb
    let hajb = apply_hajb(&input.heirs, rules);
    trace.extend(hajb.steps);
    let eligible = hajb.eligible;
    let comp = Composition::of(&eligible);

    // Fixed shares
    let mut fard = assign_fard(&eligible, &comp, &net)?;
    trace.append(&mut fard.steps);

    let portions = fard.portions();
    let fard_total = Fraction::sum(&portions)?;
    let asl = common_denominator(&portions);
    let total_siham: BigInt = to_siham(&portions, &asl).iter().sum();
    let mut summary = CalculationSummary {
        asl_masalah: asl,
        total_siham,
        method: DistributionMethod::Normal,
    };
    debug!(%fard_total, asl = %summary.asl_masalah, "fixed shares assigned");

    // Awl
    let awl_applied = fard_total.exceeds_one();
    let mut awl_ratio = None;
    if awl_applied {
        let outcome = apply_awl(&mut fard.results, &net)?;
        summary.asl_masalah = outcome.raised_asl.clone();
        summary.total_siham = outcome.raised_asl;
        summary.method = DistributionMethod::Awl;
        awl_ratio = Some(outcome.ratio);
        trace.extend(outcome.steps);
    } else if fard_total == Fraction::one() {
        settle_exact(&mut fard.results, &net)?;
    }

    let mut residue = &net - sum_shares(&fard.results);

    // Asabah
    let mut asabah_results = Vec::new();
    if !awl_applied && residue.is_positive() {
        let residue_portion = Fraction::one().sub(&fard_total)?;
        let outcome = assign_asabah(&eligible, &comp, &residue, &residue_portion)?;
        trace.extend(outcome.steps);
        asabah_results = outcome.results;
        residue -= sum_shares(&asabah_results);
    }

    // Radd
    let mut radd_results = Vec::new();
    let mut radd_applied = false;
    if !awl_applied && residue.is_positive() && asabah_results.is_empty() {
        if let Some(outcome) = apply_radd(&mut fard.results, &residue, rules)? {
            radd_applied = true;
            summary.method = DistributionMethod::Radd;
            trace.push(CalculationStep::info(format!("Radd: residue of {} returned", residue)));
            trace.extend(outcome.steps);
            radd_results = outcome.results;
            residue = BigInt::zero();
        }
    }

    // Distant relatives
    let mut dhawu_results = Vec::new();
    if residue.is_positive() && asabah_results.is_empty() && !radd_applied {
        dhawu_results = assign_dhawu(&eligible, &residue);
        summary.method = DistributionMethod::Dhawu;
        residue -= sum_shares(&dhawu_results);
    }

    // Reconciliation
    let heirs_total = sum_shares(fard.results.iter().chain(&asabah_results).chain(&dhawu_results));
    let total_distributed = &input.debt + &bequest + heirs_total;
    let undistributed = &input.total_assets - &total_distributed;
    if !undistributed.is_zero() {
        warn!(%undistributed, "estate not fully distributed");
        trace.push(CalculationStep::info(format!("Undistributed residue: {}", undistributed)));
    }
    trace.push(CalculationStep::result("Total distributed", total_distributed.clone()));

    info!(
        method = %summary.method,
        %net,
        %total_distributed,
        %undistributed,
        "faraidh calculation complete"
    );

    Ok(CalculationResult {
        total_assets: input.total_assets.clone(),
        debt: input.debt.clone(),
        bequest,
        net_estate: net,
        fard_results: fard.results,
        asabah_results,
        radd_results,
        dhawu_results,
        blocked: hajb.blocked,
        awl_applied,
        awl_ratio,
        radd_applied,
        is_gharrawain: comp.is_gharrawain(),
        is_musytarakah: fard.is_musytarakah,
        total_distributed,
        undistributed,
        summary,
        madhab,
        calculation_trace: trace,
    })
}
