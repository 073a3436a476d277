//! Blocking (hajb hirman).
//!
//! Blockers are read from the caller's original counts, so a heir that is itself
//! blocked still blocks the heirs listed under it. The table carries every multi-hop
//! rule; nothing is derived here.

use strum::IntoEnumIterator;
use tracing::debug;

use crate::heirs::{HeirCounts, HeirKind};
use crate::madhab::RuleTable;
use crate::types::CalculationStep;

#[derive(Debug, Clone, PartialEq)]
pub struct HajbOutcome {
    /// Counts after blocking; excluded categories are zero.
    pub eligible: HeirCounts,
    /// Categories present in the input but excluded, in declaration order.
    pub blocked: Vec<HeirKind>,
    pub steps: Vec<CalculationStep>,
}

pub fn apply_hajb<R: RuleTable + ?Sized>(heirs: &HeirCounts, rules: &R) -> HajbOutcome {
    let mut eligible = heirs.clone();
    let mut blocked_by: Vec<(HeirKind, HeirKind)> = Vec::new();

    for blocker in HeirKind::iter().filter(|k| heirs.present(*k)) {
        for &target in rules.blocks(blocker) {
            if eligible.get(target) > 0 {
                blocked_by.push((target, blocker));
            }
            eligible.set(target, 0);
        }
    }

    let blocked: Vec<HeirKind> = HeirKind::iter()
        .filter(|k| heirs.present(*k) && eligible.get(*k) == 0)
        .collect();

    let steps = blocked
        .iter()
        .filter_map(|heir| {
            blocked_by
                .iter()
                .find(|(target, _)| target == heir)
                .map(|(target, blocker)| CalculationStep::block(*target, *blocker))
        })
        .collect();

    if !blocked.is_empty() {
        debug!(?blocked, "hajb applied");
    }

    HajbOutcome { eligible, blocked, steps }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::madhab::{HajbTable, SYAFII_TABLE};
    use crate::config::FaraidhConfig;

    #[test]
    fn test_father_blocks_grandfather_and_brother() {
        let heirs = HeirCounts::new()
            .father(1)
            .with(HeirKind::PaternalGrandfather, 1)
            .with(HeirKind::FullBrother, 2)
            .with(HeirKind::PaternalGrandmother, 1);
        let outcome = apply_hajb(&heirs, &FaraidhConfig::default());

        assert_eq!(outcome.blocked, vec![HeirKind::PaternalGrandfather, HeirKind::FullBrother]);
        assert_eq!(outcome.eligible.full_brother, 0);
        assert_eq!(outcome.eligible.paternal_grandmother, 1);
        assert_eq!(outcome.steps.len(), 2);
        assert_eq!(outcome.steps[0].description, "paternal_grandfather blocked by father");
    }

    #[test]
    fn test_blocked_heir_still_blocks() {
        // The son's son is excluded by the daughter, yet still excludes the full brother.
        let heirs = HeirCounts::new()
            .daughter(1)
            .with(HeirKind::SonsSon, 1)
            .with(HeirKind::FullBrother, 1);
        let outcome = apply_hajb(&heirs, &FaraidhConfig::default());
        assert_eq!(outcome.blocked, vec![HeirKind::SonsSon, HeirKind::FullBrother]);
    }

    #[test]
    fn test_empty_table_blocks_nothing() {
        struct Open(HajbTable);
        impl RuleTable for Open {
            fn blocks(&self, heir: HeirKind) -> &[HeirKind] {
                self.0.blocked_by(heir)
            }
            fn is_residue_eligible(&self, _heir: HeirKind) -> bool {
                true
            }
        }

        let heirs = HeirCounts::new().son(1).with(HeirKind::FullBrother, 1);
        let outcome = apply_hajb(&heirs, &Open(HajbTable::empty()));
        assert!(outcome.blocked.is_empty());
        assert_eq!(&outcome.eligible, &heirs);

        let outcome = apply_hajb(&heirs, &Open(SYAFII_TABLE.clone()));
        assert_eq!(outcome.blocked, vec![HeirKind::FullBrother]);
    }
}
