//! Distant relatives (dhawu al-arham).
//!
//! No distant-relative category is modelled, so nothing is allocated here and any
//! residue that reaches this stage is reported as undistributed.

use num_bigint::BigInt;
use tracing::warn;

use crate::heirs::HeirCounts;
use crate::types::HeirResult;

pub fn assign_dhawu(_eligible: &HeirCounts, residue: &BigInt) -> Vec<HeirResult> {
    warn!(%residue, "residue left for distant relatives, which are not modelled");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocates_nothing() {
        assert!(assign_dhawu(&HeirCounts::new(), &BigInt::from(10)).is_empty());
    }
}
