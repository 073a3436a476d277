//! # faraidh
//!
//! Islamic inheritance (faraidh) distribution over exact rational arithmetic.
//!
//! ```rust
//! use faraidh::prelude::*;
//!
//! let input = CalculationInput::builder()
//!     .total_assets(120_000_000u64)
//!     .heirs(HeirCounts::new().husband(1).mother(1).father(1))
//!     .build()
//!     .unwrap();
//! let result = calculate(&input, &FaraidhConfig::default()).unwrap();
//! assert!(result.is_gharrawain);
//! assert_eq!(result.share_of(HeirKind::Father).to_string(), "40000000");
//! ```

pub mod amount;
pub mod builder;
pub mod config;
pub mod engine;
pub mod fraction;
pub mod heirs;
pub mod i18n;
pub mod input;
pub mod madhab;
pub mod prelude;
pub mod traits;
pub mod types;
pub mod validation;

pub use config::FaraidhConfig;
pub use engine::calculate;
pub use fraction::Fraction;
pub use heirs::{HeirCounts, HeirKind};
pub use input::CalculationInput;
pub use madhab::{Madhab, RuleTable};
pub use traits::Distribute;
pub use types::{CalculationResult, FaraidhError, HeirResult};
pub use validation::validate;
