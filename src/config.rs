use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use std::env;
use std::fs;
use std::str::FromStr;

use crate::builder::Builder;
use crate::heirs::HeirKind;
use crate::i18n::FaraidhLocale;
use crate::madhab::{self, HajbTable, Madhab, RuleTable};
use crate::types::FaraidhError;

/// Global configuration for a Faraidh calculation.
///
/// This is the injected rule set: swapping it swaps the madhab without touching the
/// allocation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FaraidhConfig {
    pub madhab: Madhab,
    /// Locale of validation messages and heir labels.
    pub locale: FaraidhLocale,
    /// Currency label carried into reports (e.g. "IDR"). Amounts are always integers
    /// in the smallest unit of this currency.
    pub currency: String,
    /// When true, spouses take part in radd alongside the other fixed-share heirs.
    pub radd_for_spouse: bool,
    /// Blocking rules. Defaults to the madhab's table.
    pub hajb: HajbTable,
}

impl Default for FaraidhConfig {
    fn default() -> Self {
        FaraidhConfig {
            madhab: Madhab::default(),
            locale: FaraidhLocale::IdID,
            currency: "IDR".to_string(),
            radd_for_spouse: false,
            hajb: HajbTable::default(),
        }
    }
}

impl FromStr for FaraidhConfig {
    type Err = FaraidhError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: FaraidhConfig = serde_json::from_str(s)
            .map_err(|e| FaraidhError::Configuration(format!("Failed to parse config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

impl FaraidhConfig {
    pub fn builder() -> FaraidhConfigBuilder {
        FaraidhConfigBuilder::default()
    }

    /// Validates the configuration for logical consistency.
    pub fn validate(&self) -> Result<(), FaraidhError> {
        if self.currency.trim().is_empty() {
            return Err(FaraidhError::Configuration("Currency label must not be empty".to_string()));
        }

        for (blocker, blocked) in self.hajb.rules() {
            if blocked.contains(&blocker) {
                return Err(FaraidhError::Configuration(format!(
                    "Hajb rule for '{}' blocks itself",
                    blocker
                )));
            }
            // Spouses and parents are never excluded (hirman) by anyone.
            if let Some(protected) = blocked.iter().find(|b| {
                matches!(b, HeirKind::Husband | HeirKind::Wife | HeirKind::Father | HeirKind::Mother)
            }) {
                return Err(FaraidhError::Configuration(format!(
                    "Hajb rule for '{}' blocks '{}', which can never be excluded",
                    blocker, protected
                )));
            }
        }

        Ok(())
    }

    /// Loads configuration from environment variables.
    ///
    /// Reads `FARAIDH_MADHAB`, `FARAIDH_LOCALE`, `FARAIDH_CURRENCY` and
    /// `FARAIDH_RADD_FOR_SPOUSE`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, FaraidhError> {
        let mut builder = Self::builder();

        if let Ok(m) = env::var("FARAIDH_MADHAB") {
            let madhab = Madhab::from_str(m.trim())
                .map_err(|_| FaraidhError::Configuration(format!("Unknown madhab: {}", m)))?;
            builder = builder.madhab(madhab);
        }
        if let Ok(l) = env::var("FARAIDH_LOCALE") {
            let locale = FaraidhLocale::from_str(l.trim()).map_err(FaraidhError::Configuration)?;
            builder = builder.locale(locale);
        }
        if let Ok(c) = env::var("FARAIDH_CURRENCY") {
            builder = builder.currency(c.trim());
        }
        if let Ok(r) = env::var("FARAIDH_RADD_FOR_SPOUSE") {
            let flag = r.trim().parse::<bool>().map_err(|e| {
                FaraidhError::Configuration(format!("Invalid FARAIDH_RADD_FOR_SPOUSE: {}", e))
            })?;
            builder = builder.radd_for_spouse(flag);
        }

        builder.build()
    }

    /// Loads configuration from a JSON file.
    pub fn try_from_json(path: &str) -> Result<Self, FaraidhError> {
        let content = fs::read_to_string(path)
            .map_err(|e| FaraidhError::Configuration(format!("Failed to read config file: {}", e)))?;
        content.parse()
    }

    pub fn with_madhab(mut self, madhab: Madhab) -> Self {
        self.madhab = madhab;
        self.hajb = madhab.default_table().clone();
        self
    }

    pub fn with_radd_for_spouse(mut self, enabled: bool) -> Self {
        self.radd_for_spouse = enabled;
        self
    }

    pub fn with_locale(mut self, locale: FaraidhLocale) -> Self {
        self.locale = locale;
        self
    }
}

impl RuleTable for FaraidhConfig {
    fn blocks(&self, heir: HeirKind) -> &[HeirKind] {
        self.hajb.blocked_by(heir)
    }

    fn is_residue_eligible(&self, heir: HeirKind) -> bool {
        if heir.is_spouse() {
            return self.radd_for_spouse;
        }
        madhab::is_residue_eligible(heir, self.madhab)
    }

    fn madhab(&self) -> Madhab {
        self.madhab
    }
}

// ========== FaraidhConfigBuilder ==========

#[derive(Default)]
pub struct FaraidhConfigBuilder {
    madhab: Option<Madhab>,
    locale: Option<FaraidhLocale>,
    currency: Option<String>,
    radd_for_spouse: Option<bool>,
    hajb: Option<HajbTable>,
}

impl FaraidhConfigBuilder {
    pub fn madhab(mut self, madhab: Madhab) -> Self {
        self.madhab = Some(madhab);
        self
    }

    pub fn locale(mut self, locale: FaraidhLocale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn radd_for_spouse(mut self, enabled: bool) -> Self {
        self.radd_for_spouse = Some(enabled);
        self
    }

    pub fn hajb(mut self, table: HajbTable) -> Self {
        self.hajb = Some(table);
        self
    }
}

impl Builder<FaraidhConfig> for FaraidhConfigBuilder {
    fn build(self) -> Result<FaraidhConfig, FaraidhError> {
        let defaults = FaraidhConfig::default();
        let madhab = self.madhab.unwrap_or_default();
        // An explicit table wins. Otherwise derive from the madhab.
        let hajb = self.hajb.unwrap_or_else(|| madhab.default_table().clone());

        let config = FaraidhConfig {
            madhab,
            locale: self.locale.unwrap_or(defaults.locale),
            currency: self.currency.unwrap_or(defaults.currency),
            radd_for_spouse: self.radd_for_spouse.unwrap_or(defaults.radd_for_spouse),
            hajb,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FaraidhConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.madhab, Madhab::Syafii);
        assert_eq!(config.currency, "IDR");
        assert!(!config.is_residue_eligible(HeirKind::Wife));
    }

    #[test]
    fn test_builder_validation() {
        let ok = FaraidhConfig::builder()
            .madhab(Madhab::Hanbali)
            .currency("USD")
            .radd_for_spouse(true)
            .build()
            .unwrap();
        assert!(ok.is_residue_eligible(HeirKind::Husband));
        assert_eq!(RuleTable::madhab(&ok), Madhab::Hanbali);

        let res = FaraidhConfig::builder().currency("  ").build();
        assert!(matches!(res, Err(FaraidhError::Configuration(_))));
    }

    #[test]
    fn test_rejects_table_blocking_a_parent() {
        let table = HajbTable::empty().with_rule(HeirKind::Son, &[HeirKind::Mother]);
        let res = FaraidhConfig::builder().hajb(table).build();
        assert!(res.is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = FaraidhConfig::default().with_radd_for_spouse(true);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: FaraidhConfig = json.parse().unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed: FaraidhConfig = r#"{"madhab":"hanafi","currency":"MYR"}"#.parse().unwrap();
        assert_eq!(parsed.madhab, Madhab::Hanafi);
        assert_eq!(parsed.currency, "MYR");
        assert_eq!(parsed.hajb, HajbTable::default());
    }

    #[test]
    fn test_malformed_json() {
        let res = "{ not json".parse::<FaraidhConfig>();
        assert!(matches!(res, Err(FaraidhError::Configuration(_))));
    }
}
