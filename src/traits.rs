use crate::config::FaraidhConfig;
use crate::madhab::RuleTable;
use crate::types::{CalculationResult, FaraidhError};

/// Trait implemented by anything that can be distributed as an estate.
pub trait Distribute {
    /// Distribute under an injected rule table.
    ///
    /// * `Result<CalculationResult, FaraidhError>`
    fn distribute(&self, rules: &dyn RuleTable) -> Result<CalculationResult, FaraidhError>;

    /// Distribute under the default configuration.
    fn distribute_default(&self) -> Result<CalculationResult, FaraidhError> {
        self.distribute(&FaraidhConfig::default())
    }
}

impl Distribute for crate::input::CalculationInput {
    fn distribute(&self, rules: &dyn RuleTable) -> Result<CalculationResult, FaraidhError> {
        crate::engine::calculate(self, rules)
    }
}
