//! Process-wide valuation constants
//!
//! Every run threads an explicit `ValuationConfig` through the pipeline; the
//! core reads no ambient globals, environment variables, or files.

use crate::error::ValuationError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Marginal tax rate applied to the cost of debt
pub const DEFAULT_MARGINAL_TAX_RATE: f64 = 0.26;

/// Default explicit forecast horizon in years
pub const DEFAULT_GROWTH_PERIOD_YEARS: u32 = 10;

/// Constants shared by every stage of a valuation run
///
/// The risk-free rate and implied equity risk premium are market observations
/// resolved by a [`MacroProvider`](crate::providers::MacroProvider) before the
/// pipeline runs; the marginal tax rate and growth horizon are modeling
/// choices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// Risk-free rate (10-year treasury yield, decimal)
    pub risk_free_rate: f64,

    /// Implied equity risk premium (decimal)
    pub equity_risk_premium: f64,

    /// Marginal tax rate used for the after-tax cost of debt
    #[serde(default = "default_marginal_tax_rate")]
    pub marginal_tax_rate: f64,

    /// Explicit forecast horizon in years
    #[serde(default = "default_growth_period_years")]
    pub growth_period_years: u32,
}

fn default_marginal_tax_rate() -> f64 {
    DEFAULT_MARGINAL_TAX_RATE
}

fn default_growth_period_years() -> u32 {
    DEFAULT_GROWTH_PERIOD_YEARS
}

impl ValuationConfig {
    /// Create a config from resolved market rates with default modeling choices
    pub fn new(risk_free_rate: f64, equity_risk_premium: f64) -> Self {
        Self {
            risk_free_rate,
            equity_risk_premium,
            marginal_tax_rate: DEFAULT_MARGINAL_TAX_RATE,
            growth_period_years: DEFAULT_GROWTH_PERIOD_YEARS,
        }
    }

    /// Load a config from a JSON file
    pub fn from_json_path(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        Ok(config)
    }

    /// Check that the config describes a well-posed model
    pub fn validate(&self) -> Result<(), ValuationError> {
        if self.growth_period_years == 0 {
            return Err(ValuationError::InvalidConfiguration(
                "growth period must be at least one year".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.marginal_tax_rate) {
            return Err(ValuationError::InvalidConfiguration(format!(
                "marginal tax rate {} outside [0, 1)",
                self.marginal_tax_rate
            )));
        }
        if !self.risk_free_rate.is_finite() || !self.equity_risk_premium.is_finite() {
            return Err(ValuationError::InvalidConfiguration(
                "non-finite market rates".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValuationConfig::new(0.045, 0.0457);
        assert_eq!(config.marginal_tax_rate, DEFAULT_MARGINAL_TAX_RATE);
        assert_eq!(config.growth_period_years, DEFAULT_GROWTH_PERIOD_YEARS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let mut config = ValuationConfig::new(0.045, 0.0457);
        config.growth_period_years = 0;
        assert!(matches!(
            config.validate(),
            Err(ValuationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_serde_defaults_fill_in() {
        let config: ValuationConfig =
            serde_json::from_str(r#"{"risk_free_rate": 0.04, "equity_risk_premium": 0.05}"#)
                .unwrap();
        assert_eq!(config.marginal_tax_rate, DEFAULT_MARGINAL_TAX_RATE);
        assert_eq!(config.growth_period_years, DEFAULT_GROWTH_PERIOD_YEARS);
    }
}
