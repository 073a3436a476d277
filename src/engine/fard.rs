//! Fixed shares (ashab al-furud).
//!
//! Evaluated in a fixed order: spouses, parents (or the Gharrawain branch), grandparents,
//! descendants, then collaterals. The order is also the order awl and radd walk, so it
//! decides who absorbs truncation slack.

use num_bigint::BigInt;
use tracing::{debug, warn};

use crate::fraction::{scale, Fraction};
use crate::heirs::{HeirCounts, HeirKind};
use crate::types::{CalculationStep, FaraidhError, HeirResult, Operation, ShareCategory};

/// How the parents are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentsCase {
    /// Spouse, father and mother with no descendant (Umariyatain): the mother takes a
    /// third of what the spouse leaves, the father takes the residue.
    Gharrawain,
    Regular,
}

/// Facts about the surviving (unblocked) family that the share rules branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Composition {
    pub has_descendant: bool,
    pub has_spouse: bool,
    /// Any sibling of any line that survived blocking.
    pub has_sibling: bool,
    pub parents: ParentsCase,
}

impl Composition {
    pub fn of(eligible: &HeirCounts) -> Self {
        let has_descendant = eligible.has_descendant();
        let has_spouse = eligible.has_spouse();
        let parents = if has_spouse && eligible.father > 0 && eligible.mother > 0 && !has_descendant {
            ParentsCase::Gharrawain
        } else {
            ParentsCase::Regular
        };

        Self {
            has_descendant,
            has_spouse,
            has_sibling: eligible.has_sibling(),
            parents,
        }
    }

    pub fn is_gharrawain(&self) -> bool {
        self.parents == ParentsCase::Gharrawain
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FardOutcome {
    pub results: Vec<HeirResult>,
    pub steps: Vec<CalculationStep>,
    pub is_musytarakah: bool,
}

impl FardOutcome {
    fn push(&mut self, heir: HeirKind, count: i64, portion: Fraction, net: &BigInt) -> Result<(), FaraidhError> {
        let amount = scale(net, &portion)?;
        self.push_amount(heir, count, portion, amount);
        Ok(())
    }

    fn push_amount(&mut self, heir: HeirKind, count: i64, portion: Fraction, amount: BigInt) {
        debug!(%heir, count, %portion, %amount, "fard");
        self.steps.push(CalculationStep::share(Operation::Fard, heir, portion.clone(), amount.clone()));
        self.results.push(HeirResult::new(heir, count, amount, portion, ShareCategory::Fard));
    }

    pub fn portions(&self) -> Vec<Fraction> {
        self.results.iter().map(|r| r.portion.clone()).collect()
    }
}

fn frac(num: i64, den: i64) -> Result<Fraction, FaraidhError> {
    Fraction::new(num, den)
}

/// Half for one, two thirds for two or more (daughters, son's daughters, sisters).
fn half_or_two_thirds(count: i64) -> Result<Fraction, FaraidhError> {
    if count == 1 { frac(1, 2) } else { frac(2, 3) }
}

pub fn assign_fard(e: &HeirCounts, comp: &Composition, net: &BigInt) -> Result<FardOutcome, FaraidhError> {
    let mut out = FardOutcome::default();

    // Spouses
    if e.husband > 0 {
        let portion = if comp.has_descendant { frac(1, 4)? } else { frac(1, 2)? };
        out.push(HeirKind::Husband, e.husband, portion, net)?;
    }
    if e.wife > 0 {
        let portion = if comp.has_descendant { frac(1, 8)? } else { frac(1, 4)? };
        out.push(HeirKind::Wife, e.wife, portion, net)?;
    }

    // Parents
    match comp.parents {
        ParentsCase::Gharrawain => {
            let spouse_amount: BigInt = out.results.iter().map(|r| &r.total_share).sum();
            let spouse_portion = Fraction::sum(out.results.iter().map(|r| &r.portion))?;
            let portion = Fraction::one().sub(&spouse_portion)?.div_int(3)?;
            let amount = (net - spouse_amount) / BigInt::from(3);
            out.steps.push(CalculationStep::info(
                "Gharrawain: mother takes 1/3 of the remainder after the spouse, father is residuary",
            ));
            out.push_amount(HeirKind::Mother, 1, portion, amount);
        }
        ParentsCase::Regular => {
            if e.mother > 0 {
                let portion = if comp.has_descendant || comp.has_sibling {
                    frac(1, 6)?
                } else {
                    frac(1, 3)?
                };
                out.push(HeirKind::Mother, e.mother, portion, net)?;
            }
            if e.father > 0 && comp.has_descendant {
                out.push(HeirKind::Father, e.father, frac(1, 6)?, net)?;
            }
        }
    }

    // Grandparents
    if e.paternal_grandfather > 0 && e.father == 0 && comp.has_descendant {
        out.push(HeirKind::PaternalGrandfather, e.paternal_grandfather, frac(1, 6)?, net)?;
    }
    if e.mother == 0 {
        for gm in [HeirKind::PaternalGrandmother, HeirKind::MaternalGrandmother] {
            if e.present(gm) {
                out.push(gm, e.get(gm), frac(1, 6)?, net)?;
            }
        }
    }

    // Descendants
    if e.daughter > 0 && e.son == 0 {
        out.push(HeirKind::Daughter, e.daughter, half_or_two_thirds(e.daughter)?, net)?;
    }
    if e.sons_daughter > 0 && e.son == 0 && e.sons_son == 0 {
        if e.daughter == 0 {
            out.push(HeirKind::SonsDaughter, e.sons_daughter, half_or_two_thirds(e.sons_daughter)?, net)?;
        } else if e.daughter == 1 {
            // Completes the two thirds (takmilah).
            out.push(HeirKind::SonsDaughter, e.sons_daughter, frac(1, 6)?, net)?;
        }
    }

    // Collaterals. Who is excluded beside a father or grandfather is the rule table's call.
    let sisters_may_take_fard = !comp.has_descendant;
    let full_sisters_fard = sisters_may_take_fard && e.full_sister > 0 && e.full_brother == 0;
    if full_sisters_fard {
        out.push(HeirKind::FullSister, e.full_sister, half_or_two_thirds(e.full_sister)?, net)?;
    }
    if sisters_may_take_fard && e.paternal_half_sister > 0 && e.full_brother == 0 && e.paternal_half_brother == 0 {
        if !full_sisters_fard {
            out.push(
                HeirKind::PaternalHalfSister,
                e.paternal_half_sister,
                half_or_two_thirds(e.paternal_half_sister)?,
                net,
            )?;
        } else if e.full_sister == 1 {
            out.push(HeirKind::PaternalHalfSister, e.paternal_half_sister, frac(1, 6)?, net)?;
        }
    }

    let maternal = e.maternal_half_brother + e.maternal_half_sister;
    if maternal > 0 {
        let group = if maternal == 1 { frac(1, 6)? } else { frac(1, 3)? };
        // Equal per head regardless of sex.
        let per_person = scale(net, &group)? / BigInt::from(maternal);
        for kind in [HeirKind::MaternalHalfBrother, HeirKind::MaternalHalfSister] {
            let count = e.get(kind);
            if count > 0 {
                let portion = group.mul_int(count)?.div_int(maternal)?;
                out.push_amount(kind, count, portion, &per_person * BigInt::from(count));
            }
        }

        let mother_or_grandmother = out
            .results
            .iter()
            .any(|r| matches!(r.heir, HeirKind::Mother | HeirKind::PaternalGrandmother | HeirKind::MaternalGrandmother));
        if e.husband > 0 && mother_or_grandmother && maternal >= 2 && e.full_brother > 0 {
            warn!("musytarakah configuration detected; full brothers are not admitted to the maternal third");
            out.steps.push(CalculationStep::info(
                "Musytarakah detected: full brothers do not share the maternal siblings' third",
            ));
            out.is_musytarakah = true;
        }
    }

    Ok(out)
}
