//! FCFF projection, discounting, and value synthesis
//!
//! Projects adjusted EBIAT forward at the sustainable growth rate, converts
//! it to FCFF through the reinvestment rate, discounts the explicit horizon
//! at the current-beta WACC, and caps the forecast with a stable-growth
//! perpetuity whose long-run growth equals the risk-free rate.

use super::cashflows::{ProjectionResult, YearCashflow};
use crate::capital::CostOfCapital;
use crate::config::ValuationConfig;
use crate::error::ValuationError;
use crate::growth::GrowthAssumptions;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Projection engine for one valuation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionEngine {
    /// Explicit forecast horizon in years
    horizon_years: u32,

    /// Risk-free rate, doubling as the terminal growth rate
    risk_free_rate: f64,
}

impl ProjectionEngine {
    /// Create an engine from the run configuration
    pub fn new(config: &ValuationConfig) -> Self {
        Self {
            horizon_years: config.growth_period_years,
            risk_free_rate: config.risk_free_rate,
        }
    }

    /// Project and discount FCFF over the explicit horizon plus terminal value
    ///
    /// Discounting is end-of-year: year `y`'s FCFF is divided by
    /// `(1 + WACC)^(y+1)`. The terminal perpetuity grows at the risk-free
    /// rate and is discounted at the stable-beta WACC, which must exceed the
    /// risk-free rate for the perpetuity to converge.
    pub fn project(
        &self,
        adjusted_ebiat: f64,
        growth: &GrowthAssumptions,
        current: &CostOfCapital,
        stable: &CostOfCapital,
    ) -> Result<ProjectionResult, ValuationError> {
        if self.horizon_years == 0 {
            return Err(ValuationError::InvalidConfiguration(
                "growth period must be at least one year".to_string(),
            ));
        }

        let mut years = Vec::with_capacity(self.horizon_years as usize);
        let mut ebiat = adjusted_ebiat;
        let mut explicit_fcff_pv = 0.0;

        for year in 0..self.horizon_years {
            ebiat *= 1.0 + growth.growth_rate;
            let fcff = ebiat * (1.0 - growth.reinvestment_rate);
            let discount_factor = (1.0 + current.wacc).powi(-(year as i32 + 1));
            let fcff_pv = fcff * discount_factor;
            explicit_fcff_pv += fcff_pv;

            debug!("year {}: EBIAT = {:.2}, FCFF = {:.2}, PV = {:.2}", year, ebiat, fcff, fcff_pv);

            years.push(YearCashflow {
                year,
                ebiat,
                fcff,
                discount_factor,
                fcff_pv,
            });
        }

        if stable.wacc <= self.risk_free_rate {
            return Err(ValuationError::InvalidConfiguration(format!(
                "stable WACC {:.4} does not exceed the risk-free rate {:.4}; \
                 the terminal perpetuity does not converge",
                stable.wacc, self.risk_free_rate
            )));
        }

        let final_fcff = years.last().map(|row| row.fcff).unwrap_or(0.0);
        let terminal_value =
            final_fcff * (1.0 + self.risk_free_rate) / (stable.wacc - self.risk_free_rate);
        let terminal_value_pv =
            terminal_value / (1.0 + current.wacc).powi(self.horizon_years as i32);

        info!(
            "explicit FCFF PV = {:.2}, terminal value PV = {:.2}",
            explicit_fcff_pv, terminal_value_pv
        );

        Ok(ProjectionResult {
            years,
            explicit_fcff_pv,
            terminal_value_pv,
        })
    }
}

/// Enterprise value: operating value plus cash, net of book debt
pub fn enterprise_value(projection: &ProjectionResult, cash: f64, book_debt: f64) -> f64 {
    projection.operating_value() + cash - book_debt
}

/// Intrinsic per-share value from enterprise value
pub fn intrinsic_share_value(
    enterprise_value: f64,
    shares_outstanding: f64,
) -> Result<f64, ValuationError> {
    if shares_outstanding <= 0.0 {
        return Err(ValuationError::InvalidConfiguration(format!(
            "shares outstanding must be positive, got {}",
            shares_outstanding
        )));
    }
    Ok(enterprise_value / shares_outstanding)
}

/// Absolute and percentage margin of safety versus the market price
pub fn margin_of_safety(intrinsic_value: f64, price: f64) -> Result<(f64, f64), ValuationError> {
    if intrinsic_value == 0.0 {
        return Err(ValuationError::Undefined("margin of safety percentage"));
    }
    let absolute = intrinsic_value - price;
    let percentage = 1.0 - price / intrinsic_value;
    Ok((absolute, percentage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cost_of_capital(beta: f64, wacc: f64) -> CostOfCapital {
        CostOfCapital {
            beta,
            cost_of_equity: wacc,
            interest_coverage: 10.0,
            default_spread: 0.0078,
            cost_of_debt: wacc,
            percent_debt: 0.0,
            percent_equity: 1.0,
            wacc,
        }
    }

    fn sample_growth() -> GrowthAssumptions {
        GrowthAssumptions {
            reinvestment_rate: 0.3,
            roic: 0.2,
            growth_rate: 0.06,
        }
    }

    fn sample_config() -> ValuationConfig {
        let mut config = ValuationConfig::new(0.045, 0.05);
        config.growth_period_years = 5;
        config
    }

    #[test]
    fn test_compounding_and_discounting() {
        let engine = ProjectionEngine::new(&sample_config());
        let current = cost_of_capital(1.0, 0.09);
        let stable = cost_of_capital(1.0, 0.08);

        let result = engine
            .project(1000.0, &sample_growth(), &current, &stable)
            .unwrap();

        assert_eq!(result.years.len(), 5);
        // Year 0 grows once before converting to FCFF
        assert_relative_eq!(result.years[0].ebiat, 1060.0);
        assert_relative_eq!(result.years[0].fcff, 1060.0 * 0.7);
        assert_relative_eq!(result.years[0].fcff_pv, 1060.0 * 0.7 / 1.09, epsilon = 1e-9);
        // Each subsequent year compounds off the previous
        assert_relative_eq!(result.years[1].ebiat, 1060.0 * 1.06);

        let manual_pv: f64 = result
            .years
            .iter()
            .map(|row| row.fcff / 1.09_f64.powi(row.year as i32 + 1))
            .sum();
        assert_relative_eq!(result.explicit_fcff_pv, manual_pv, epsilon = 1e-9);
    }

    #[test]
    fn test_terminal_value_perpetuity() {
        let engine = ProjectionEngine::new(&sample_config());
        let current = cost_of_capital(1.0, 0.09);
        let stable = cost_of_capital(1.0, 0.08);

        let result = engine
            .project(1000.0, &sample_growth(), &current, &stable)
            .unwrap();

        let expected_terminal =
            result.final_fcff() * 1.045 / (0.08 - 0.045) / 1.09_f64.powi(5);
        assert_relative_eq!(result.terminal_value_pv, expected_terminal, epsilon = 1e-9);
        assert!(result.terminal_value_pv > 0.0);
    }

    #[test]
    fn test_negative_fcff_projects_negative_terminal_value() {
        // Reinvestment above 100% of EBIAT turns every projected FCFF
        // negative; the terminal perpetuity still converges and simply
        // carries the sign through. Only stable WACC <= risk-free is an
        // error condition.
        let engine = ProjectionEngine::new(&sample_config());
        let current = cost_of_capital(1.0, 0.09);
        let stable = cost_of_capital(1.0, 0.08);
        let growth = GrowthAssumptions {
            reinvestment_rate: 1.2,
            roic: 0.05,
            growth_rate: 0.06,
        };

        let result = engine.project(1000.0, &growth, &current, &stable).unwrap();

        assert!(result.final_fcff() < 0.0);
        assert!(result.terminal_value_pv < 0.0);
        assert!(result.explicit_fcff_pv < 0.0);
    }

    #[test]
    fn test_stable_wacc_at_or_below_risk_free_fails() {
        let engine = ProjectionEngine::new(&sample_config());
        let current = cost_of_capital(1.0, 0.09);

        for stable_wacc in [0.045, 0.03] {
            let stable = cost_of_capital(1.0, stable_wacc);
            assert!(matches!(
                engine.project(1000.0, &sample_growth(), &current, &stable),
                Err(ValuationError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_enterprise_and_intrinsic_value() {
        let projection = ProjectionResult {
            years: Vec::new(),
            explicit_fcff_pv: 5000.0,
            terminal_value_pv: 12000.0,
        };
        let ev = enterprise_value(&projection, 400.0, 600.0);
        assert_relative_eq!(ev, 16800.0);

        let intrinsic = intrinsic_share_value(ev, 1000.0).unwrap();
        assert_relative_eq!(intrinsic, 16.8);

        assert!(matches!(
            intrinsic_share_value(ev, 0.0),
            Err(ValuationError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            intrinsic_share_value(ev, -5.0),
            Err(ValuationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_margin_of_safety() {
        let (absolute, percentage) = margin_of_safety(20.0, 15.0).unwrap();
        assert_relative_eq!(absolute, 5.0);
        assert_relative_eq!(percentage, 0.25);

        assert_eq!(
            margin_of_safety(0.0, 15.0).unwrap_err(),
            ValuationError::Undefined("margin of safety percentage")
        );
    }
}
