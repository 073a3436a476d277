use num_bigint::BigInt;
use num_traits::Zero;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::amount::IntoAmount;
use crate::builder::Builder;
use crate::fraction::Fraction;
use crate::heirs::{HeirCounts, HeirKind};
use crate::madhab::Madhab;
use crate::types::FaraidhError;

/// Everything a calculation needs: the estate, its deductions and who survives.
///
/// Constructed once by the caller and never mutated. Amounts are integers in the
/// smallest unit of the configured currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CalculationInput {
    #[serde(with = "crate::amount::serde_bigint")]
    #[schemars(with = "String")]
    pub total_assets: BigInt,
    #[serde(default, with = "crate::amount::serde_bigint")]
    #[schemars(with = "String")]
    pub debt: BigInt,
    /// Bequest (wasiat) as a fraction of the estate after debts. Kept exactly as given
    /// so that validation can report a bad denominator.
    #[serde(default = "Fraction::zero")]
    pub bequest: Fraction,
    #[serde(default)]
    pub heirs: HeirCounts,
    #[serde(default)]
    pub madhab: Option<Madhab>,
}

impl CalculationInput {
    pub fn new(total_assets: BigInt, heirs: HeirCounts) -> Self {
        Self {
            total_assets,
            debt: BigInt::zero(),
            bequest: Fraction::zero(),
            heirs,
            madhab: None,
        }
    }

    pub fn builder() -> CalculationInputBuilder {
        CalculationInputBuilder::default()
    }
}

// ========== CalculationInputBuilder ==========

/// Builder for [`CalculationInput`].
///
/// Amount setters accept anything implementing [`IntoAmount`]; a conversion failure is
/// kept and reported by `build()` so the chain stays fluent.
#[derive(Default)]
pub struct CalculationInputBuilder {
    total_assets: Option<BigInt>,
    debt: Option<BigInt>,
    bequest: Option<Fraction>,
    heirs: HeirCounts,
    madhab: Option<Madhab>,
    error: Option<FaraidhError>,
}

impl CalculationInputBuilder {
    fn amount(&mut self, value: impl IntoAmount) -> Option<BigInt> {
        match value.into_amount() {
            Ok(v) => Some(v),
            Err(e) => {
                self.error.get_or_insert(e);
                None
            }
        }
    }

    pub fn total_assets(mut self, value: impl IntoAmount) -> Self {
        self.total_assets = self.amount(value);
        self
    }

    pub fn debt(mut self, value: impl IntoAmount) -> Self {
        self.debt = self.amount(value);
        self
    }

    /// Bequest of `num/den` of the estate after debts.
    pub fn bequest(mut self, num: impl Into<BigInt>, den: impl Into<BigInt>) -> Self {
        self.bequest = Some(Fraction::raw(num, den));
        self
    }

    pub fn heirs(mut self, heirs: HeirCounts) -> Self {
        self.heirs = heirs;
        self
    }

    /// Sets the head-count of one heir category.
    pub fn heir(mut self, kind: HeirKind, count: i64) -> Self {
        self.heirs.set(kind, count);
        self
    }

    pub fn madhab(mut self, madhab: Madhab) -> Self {
        self.madhab = Some(madhab);
        self
    }
}

impl Builder<CalculationInput> for CalculationInputBuilder {
    /// Fails only on an unparseable amount or a missing `total_assets`; domain checks
    /// are left to `validate`.
    fn build(self) -> Result<CalculationInput, FaraidhError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let total_assets = self
            .total_assets
            .ok_or_else(|| FaraidhError::InvalidAmount("total_assets is required".to_string()))?;

        Ok(CalculationInput {
            total_assets,
            debt: self.debt.unwrap_or_default(),
            bequest: self.bequest.unwrap_or_else(Fraction::zero),
            heirs: self.heirs,
            madhab: self.madhab,
        })
    }
}
