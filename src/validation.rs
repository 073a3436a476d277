//! # Input Validation
//!
//! `validate` runs every check independently and returns all violations. An empty list
//! means the input may be calculated; the engine refuses anything else.

use num_bigint::BigInt;
use num_traits::Signed;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};

use crate::heirs::HeirKind;
use crate::i18n::{default_translator, FaraidhLocale, Translator};
use crate::input::CalculationInput;

/// Upper bound on the number of wives.
pub const MAX_WIVES: i64 = 4;

/// Upper bound on the head-count of any unbounded category. Keeps every count, sum and
/// 2:1 weight well inside `i64`.
pub const MAX_HEIR_COUNT: i64 = 1_000_000;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    NegativeAssets,
    NegativeDebt,
    DebtExceedsAssets,
    InvalidBequestDenominator,
    NegativeBequest,
    BequestExceedsOneThird,
    NegativeHeirCount,
    HeirCountTooLarge,
    InvalidZeroOneValue,
    WifeCountOutOfRange,
    InvalidSpouseCombination,
}

impl ValidationCode {
    /// Fluent message id.
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationCode::NegativeAssets => "error-negative-assets",
            ValidationCode::NegativeDebt => "error-negative-debt",
            ValidationCode::DebtExceedsAssets => "error-debt-exceeds-assets",
            ValidationCode::InvalidBequestDenominator => "error-invalid-bequest-denominator",
            ValidationCode::NegativeBequest => "error-negative-bequest",
            ValidationCode::BequestExceedsOneThird => "error-bequest-exceeds-one-third",
            ValidationCode::NegativeHeirCount => "error-negative-heir-count",
            ValidationCode::HeirCountTooLarge => "error-heir-count-too-large",
            ValidationCode::InvalidZeroOneValue => "error-invalid-zero-one",
            ValidationCode::WifeCountOutOfRange => "error-too-many-wives",
            ValidationCode::InvalidSpouseCombination => "error-invalid-spouse-combination",
        }
    }
}

/// One violation, scoped to an input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `heirs.wife`.
    pub field: String,
    /// English message.
    pub message: String,
    pub code: ValidationCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heir: Option<HeirKind>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, code: ValidationCode, heir: Option<HeirKind>) -> Self {
        let mut error = Self { field: field.into(), message: String::new(), code, heir };
        error.message = error.localized(default_translator(), FaraidhLocale::EnUS);
        error
    }

    /// The message rendered in another locale.
    pub fn localized(&self, translator: &Translator, locale: FaraidhLocale) -> String {
        let mut args = HashMap::new();
        if let Some(heir) = self.heir {
            args.insert("heir".to_string(), translator.heir_label(locale, heir));
        }
        match self.code {
            ValidationCode::WifeCountOutOfRange => {
                args.insert("max".to_string(), MAX_WIVES.to_string());
            }
            ValidationCode::HeirCountTooLarge => {
                args.insert("max".to_string(), MAX_HEIR_COUNT.to_string());
            }
            _ => {}
        }
        translator.translate_with_args(locale, self.code.message_key(), Some(&args))
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.field, self.message)
    }
}

/// Checks a calculation input. All checks run; nothing short-circuits.
pub fn validate(input: &CalculationInput) -> Vec<ValidationError> {
    let mut errors = validate_amounts(input);
    errors.extend(validate_heir_counts(input));
    errors
}

fn validate_amounts(input: &CalculationInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if input.total_assets.is_negative() {
        errors.push(ValidationError::new("total_assets", ValidationCode::NegativeAssets, None));
    }
    if input.debt.is_negative() {
        errors.push(ValidationError::new("debt", ValidationCode::NegativeDebt, None));
    }
    if input.debt > input.total_assets {
        errors.push(ValidationError::new("debt", ValidationCode::DebtExceedsAssets, None));
    }

    let num = input.bequest.numer();
    let den = input.bequest.denom();
    if !den.is_positive() {
        errors.push(ValidationError::new("bequest.den", ValidationCode::InvalidBequestDenominator, None));
    }
    if num.is_negative() {
        errors.push(ValidationError::new("bequest.num", ValidationCode::NegativeBequest, None));
    }
    if num * BigInt::from(3) > *den {
        errors.push(ValidationError::new("bequest", ValidationCode::BequestExceedsOneThird, None));
    }

    errors
}

fn validate_heir_counts(input: &CalculationInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let heirs = &input.heirs;

    if heirs.husband >= 1 && heirs.wife >= 1 {
        errors.push(ValidationError::new("heirs", ValidationCode::InvalidSpouseCombination, None));
    }

    for (kind, count) in heirs.iter() {
        let field = format!("heirs.{}", kind);
        if count < 0 {
            errors.push(ValidationError::new(field.clone(), ValidationCode::NegativeHeirCount, Some(kind)));
        }
        match kind.max_count() {
            Some(1) if count != 0 && count != 1 => {
                errors.push(ValidationError::new(field, ValidationCode::InvalidZeroOneValue, Some(kind)));
            }
            Some(max) if kind == HeirKind::Wife && !(0..=max).contains(&count) => {
                errors.push(ValidationError::new(field, ValidationCode::WifeCountOutOfRange, Some(kind)));
            }
            None if count > MAX_HEIR_COUNT => {
                errors.push(ValidationError::new(field, ValidationCode::HeirCountTooLarge, Some(kind)));
            }
            _ => {}
        }
    }

    errors
}

/// Convenience for callers that only need a yes/no.
pub fn is_valid(input: &CalculationInput) -> bool {
    validate(input).is_empty()
}
