//! Prelude module for faraidh
//!
//! Re-exports the types needed for everyday use.
//!
//! # Usage
//!
//! ```rust
//! use faraidh::prelude::*;
//! ```

pub use crate::amount::IntoAmount;
pub use crate::builder::Builder;
pub use crate::config::{FaraidhConfig, FaraidhConfigBuilder};
pub use crate::engine::calculate;
pub use crate::fraction::{scale, Fraction};
pub use crate::heirs::{HeirCounts, HeirKind};
pub use crate::i18n::{default_translator, FaraidhLocale, Translator};
pub use crate::input::{CalculationInput, CalculationInputBuilder};
pub use crate::madhab::{HajbTable, Madhab, RuleTable};
pub use crate::traits::Distribute;
pub use crate::types::{
    CalculationResult, CalculationStep, CalculationSummary, DistributionMethod, FaraidhError, HeirResult,
    Operation, ShareCategory,
};
pub use crate::validation::{validate, ValidationCode, ValidationError, MAX_HEIR_COUNT};
