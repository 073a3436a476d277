use num_bigint::BigInt;
use num_traits::Zero;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::fraction::Fraction;
use crate::heirs::HeirKind;
use crate::i18n::{default_translator, FaraidhLocale, Translator};
use crate::madhab::Madhab;
use crate::validation::ValidationError;

/// Which stage of the pipeline produced a heir's share.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShareCategory {
    /// Fixed share (ashab al-furud).
    Fard,
    /// Residuary (asabah).
    Asabah,
    /// Return of residue (radd) folded into a fixed share.
    Radd,
    /// Distant relatives (dhawu al-arham).
    Dhawu,
}

/// The share allotted to one heir category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HeirResult {
    pub heir: HeirKind,
    /// Head-count of the category.
    pub count: i64,
    /// Amount for the whole category, in the smallest currency unit.
    #[serde(with = "crate::amount::serde_bigint")]
    #[schemars(with = "String")]
    pub total_share: BigInt,
    /// `total_share / count`, truncated. Equal to `total_share` for a single heir.
    #[serde(with = "crate::amount::serde_bigint")]
    #[schemars(with = "String")]
    pub individual_share: BigInt,
    /// The category's portion of the net estate.
    pub portion: Fraction,
    pub category: ShareCategory,
}

impl HeirResult {
    pub fn new(heir: HeirKind, count: i64, total_share: BigInt, portion: Fraction, category: ShareCategory) -> Self {
        let individual_share = if count > 1 {
            &total_share / BigInt::from(count)
        } else {
            total_share.clone()
        };
        Self { heir, count, total_share, individual_share, portion, category }
    }

    /// Replaces the total and recomputes the per-head share.
    pub(crate) fn set_total(&mut self, total_share: BigInt) {
        self.individual_share = if self.count > 1 {
            &total_share / BigInt::from(self.count)
        } else {
            total_share.clone()
        };
        self.total_share = total_share;
    }
}

/// How the estate was resolved.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
    Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DistributionMethod {
    /// Fixed shares and residuaries, no adjustment.
    #[default]
    Normal,
    /// Proportional reduction of over-subscribed fixed shares.
    Awl,
    /// Residue returned to fixed-share heirs.
    Radd,
    /// Residue left to distant relatives.
    Dhawu,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CalculationSummary {
    /// Common denominator of the fixed shares (raised base under awl).
    #[serde(with = "crate::amount::serde_bigint")]
    #[schemars(with = "String")]
    pub asl_masalah: BigInt,
    /// Sum of the fixed-share units.
    #[serde(with = "crate::amount::serde_bigint")]
    #[schemars(with = "String")]
    pub total_siham: BigInt,
    pub method: DistributionMethod,
}

/// Kind of a trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Initial,
    Subtract,
    Block,
    Fard,
    Awl,
    Asabah,
    Radd,
    Info,
    Result,
}

/// Represents a single step of a calculation.
///
/// The trace makes every stage auditable: what was deducted, who was blocked, which
/// fraction each heir received and how any adjustment changed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CalculationStep {
    pub description: String,
    pub operation: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heir: Option<HeirKind>,
    #[serde(default, with = "crate::amount::serde_bigint_opt", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub amount: Option<BigInt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraction: Option<Fraction>,
}

impl CalculationStep {
    fn base(description: impl Into<String>, operation: Operation) -> Self {
        Self { description: description.into(), operation, heir: None, amount: None, fraction: None }
    }

    pub fn initial(description: impl Into<String>, amount: BigInt) -> Self {
        Self { amount: Some(amount), ..Self::base(description, Operation::Initial) }
    }

    pub fn subtract(description: impl Into<String>, amount: BigInt) -> Self {
        Self { amount: Some(amount), ..Self::base(description, Operation::Subtract) }
    }

    pub fn block(heir: HeirKind, blocker: HeirKind) -> Self {
        Self {
            heir: Some(heir),
            ..Self::base(format!("{} blocked by {}", heir, blocker), Operation::Block)
        }
    }

    /// A share assigned to `heir` at some stage.
    pub fn share(operation: Operation, heir: HeirKind, fraction: Fraction, amount: BigInt) -> Self {
        Self {
            heir: Some(heir),
            amount: Some(amount),
            fraction: Some(fraction),
            ..Self::base(heir.to_string(), operation)
        }
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self::base(description, Operation::Info)
    }

    pub fn result(description: impl Into<String>, amount: BigInt) -> Self {
        Self { amount: Some(amount), ..Self::base(description, Operation::Result) }
    }
}

/// The full, reconciled distribution of one estate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CalculationResult {
    #[serde(with = "crate::amount::serde_bigint")]
    #[schemars(with = "String")]
    pub total_assets: BigInt,
    #[serde(with = "crate::amount::serde_bigint")]
    #[schemars(with = "String")]
    pub debt: BigInt,
    #[serde(with = "crate::amount::serde_bigint")]
    #[schemars(with = "String")]
    pub bequest: BigInt,
    #[serde(with = "crate::amount::serde_bigint")]
    #[schemars(with = "String")]
    pub net_estate: BigInt,

    /// Fixed-share heirs. Under radd these already include the returned residue.
    pub fard_results: Vec<HeirResult>,
    pub asabah_results: Vec<HeirResult>,
    /// The returned residue per heir, for reporting. Already counted in `fard_results`.
    pub radd_results: Vec<HeirResult>,
    pub dhawu_results: Vec<HeirResult>,

    /// Categories excluded by hajb, in declaration order.
    pub blocked: Vec<HeirKind>,
    pub awl_applied: bool,
    /// Factor the fixed shares were multiplied by under awl (e.g. `6/8`).
    pub awl_ratio: Option<Fraction>,
    pub radd_applied: bool,
    pub is_gharrawain: bool,
    /// The shared-residue configuration was detected. It is reported, not modelled.
    pub is_musytarakah: bool,

    /// `debt + bequest + Σ heir shares`.
    #[serde(with = "crate::amount::serde_bigint")]
    #[schemars(with = "String")]
    pub total_distributed: BigInt,
    /// Residue no modelled heir could take.
    #[serde(with = "crate::amount::serde_bigint")]
    #[schemars(with = "String")]
    pub undistributed: BigInt,

    pub summary: CalculationSummary,
    pub madhab: Madhab,
    pub calculation_trace: Vec<CalculationStep>,
}

impl CalculationResult {
    pub fn ibtal_applied(&self) -> bool {
        !self.blocked.is_empty()
    }

    /// Every result that carries money, in pipeline order. Radd entries are excluded
    /// because they are already folded into the fixed shares.
    pub fn all_results(&self) -> impl Iterator<Item = &HeirResult> {
        self.fard_results
            .iter()
            .chain(self.asabah_results.iter())
            .chain(self.dhawu_results.iter())
    }

    /// First result for a heir category, if it inherits.
    pub fn result_for(&self, heir: HeirKind) -> Option<&HeirResult> {
        self.all_results().find(|r| r.heir == heir)
    }

    /// Total amount received by a heir category across all stages (zero if none).
    pub fn share_of(&self, heir: HeirKind) -> BigInt {
        self.all_results()
            .filter(|r| r.heir == heir)
            .map(|r| &r.total_share)
            .sum()
    }

    pub fn heirs_total(&self) -> BigInt {
        self.all_results().map(|r| &r.total_share).sum()
    }

    /// Checks the conservation identity against `total_assets`.
    pub fn is_balanced(&self) -> bool {
        let distributed = &self.debt + &self.bequest + self.heirs_total();
        distributed == self.total_distributed
            && &self.total_distributed + &self.undistributed == self.total_assets
    }

    pub fn is_blocked(&self, heir: HeirKind) -> bool {
        self.blocked.contains(&heir)
    }

    /// Human-readable walk through the trace, with English heir labels.
    pub fn explain(&self) -> String {
        self.explain_in(default_translator(), FaraidhLocale::EnUS)
    }

    pub fn explain_in(&self, translator: &Translator, locale: FaraidhLocale) -> String {
        use std::fmt::Write;
        let mut output = String::new();

        let _ = writeln!(output, "Faraidh distribution ({}, method: {}):", self.madhab, self.summary.method);
        let _ = writeln!(output, "{:-<60}", "");

        let labelled: Vec<(String, &CalculationStep)> = self
            .calculation_trace
            .iter()
            .map(|step| {
                let text = match (step.operation, step.heir) {
                    (Operation::Fard | Operation::Awl | Operation::Asabah | Operation::Radd, Some(heir)) => {
                        translator.heir_label(locale, heir)
                    }
                    _ => step.description.clone(),
                };
                (text, step)
            })
            .collect();

        let width = labelled.iter().map(|(t, _)| t.chars().count()).max().unwrap_or(20).max(20);

        for (text, step) in &labelled {
            let symbol = match step.operation {
                Operation::Initial => " ",
                Operation::Subtract => "-",
                Operation::Block => "x",
                Operation::Fard => "f",
                Operation::Awl => "a",
                Operation::Asabah => "r",
                Operation::Radd => "+",
                Operation::Result => "=",
                Operation::Info => "i",
            };
            match step.operation {
                Operation::Info => {
                    let _ = writeln!(output, "  INFO: {}", text);
                }
                Operation::Block => {
                    let _ = writeln!(output, "  {} {}", symbol, text);
                }
                _ => {
                    let amount = step.amount.as_ref().map(|a| a.to_string()).unwrap_or_default();
                    let fraction = step.fraction.as_ref().map(|f| format!(" ({})", f)).unwrap_or_default();
                    let _ = writeln!(output, "  {} {:<width$} : {:>15}{}", symbol, text, amount, fraction, width = width);
                }
            }
        }

        let _ = writeln!(output, "{:-<60}", "");
        let _ = writeln!(output, "Asl al-masalah: {} | Total siham: {}", self.summary.asl_masalah, self.summary.total_siham);
        if !self.undistributed.is_zero() {
            let _ = writeln!(output, "Undistributed: {}", self.undistributed);
        }
        output
    }
}

impl std::fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Net estate: {} (method: {})", self.net_estate, self.summary.method)?;
        for r in self.all_results() {
            writeln!(f, "  {} x{}: {} [{}, {}]", r.heir, r.count, r.total_share, r.portion, r.category)?;
        }
        write!(f, "Distributed: {} of {}", self.total_distributed, self.total_assets)
    }
}

fn describe_validation(errors: &[ValidationError]) -> String {
    match errors.first() {
        Some(first) if errors.len() > 1 => {
            format!("{} (and {} more)", first.message, errors.len() - 1)
        }
        Some(first) => first.message.clone(),
        None => "no details".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum FaraidhError {
    #[error("Invalid input: {}", describe_validation(.0))]
    Validation(Vec<ValidationError>),
    #[error("Division by zero in '{operation}'")]
    DivisionByZero { operation: String },
    #[error("Negative base {value} passed to '{operation}'")]
    NegativeBase { operation: String, value: String },
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),
    #[error("Arithmetic overflow: operation '{operation}' failed")]
    Overflow { operation: String },
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl FaraidhError {
    /// The collected violations when this is a validation failure.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            FaraidhError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationCode;

    #[test]
    fn test_individual_share() {
        let r = HeirResult::new(
            HeirKind::Daughter,
            3,
            BigInt::from(100),
            Fraction::new(2, 3).unwrap(),
            ShareCategory::Fard,
        );
        assert_eq!(r.individual_share, BigInt::from(33));

        let single = HeirResult::new(HeirKind::Wife, 1, BigInt::from(7), Fraction::one(), ShareCategory::Fard);
        assert_eq!(single.individual_share, BigInt::from(7));
    }

    #[test]
    fn test_error_display() {
        let err = FaraidhError::Validation(vec![
            ValidationError::new("debt", ValidationCode::NegativeDebt, None),
            ValidationError::new("total_assets", ValidationCode::NegativeAssets, None),
        ]);
        assert_eq!(err.to_string(), "Invalid input: Debt must not be negative (and 1 more)");
        assert_eq!(err.validation_errors().map(|e| e.len()), Some(2));

        let err = FaraidhError::DivisionByZero { operation: "reduce".to_string() };
        assert_eq!(err.to_string(), "Division by zero in 'reduce'");
        assert!(err.validation_errors().is_none());
    }

    #[test]
    fn test_step_serialisation_skips_empty_fields() {
        let step = CalculationStep::info("Gharrawain");
        let json = serde_json::to_string(&step).unwrap();
        assert_eq!(json, r#"{"description":"Gharrawain","operation":"info"}"#);

        let step = CalculationStep::initial("Total assets", BigInt::from(5));
        let back: CalculationStep = serde_json::from_str(&serde_json::to_string(&step).unwrap()).unwrap();
        assert_eq!(back, step);
    }
}
