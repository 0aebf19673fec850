//! Valuation pipeline and the immutable result record
//!
//! `compute_valuation` is the core boundary operation: a pure function of
//! fully resolved inputs. Each stage consumes its predecessor's complete
//! output; any stage failure aborts the run and no partial record is
//! produced.

use crate::capital::{estimate_cost_of_capital, CostOfCapital, CreditSpreadTable};
use crate::config::ValuationConfig;
use crate::error::ValuationError;
use crate::fundamentals::{normalize, Fundamentals};
use crate::growth::{classify_wealth, derive_growth, stable_beta, GrowthAssumptions, WealthProfile};
use crate::projection::{
    enterprise_value, intrinsic_share_value, margin_of_safety, ProjectionEngine, ProjectionResult,
};
use crate::rnd::{capitalize_rnd, AmortizationSchedule};
use crate::statements::{CompanyQuote, FinancialStatementSet, IndustryClassification};
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

/// Immutable aggregate of one valuation run
///
/// Identity and market metadata, every intermediate the pipeline produced,
/// and the final intrinsic value with its margin of safety. Keyed by
/// (ticker, valuation date) when persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationRecord {
    // Identity and metadata
    pub ticker: String,
    pub valuation_date: NaiveDate,
    pub company_name: String,
    pub industry: String,
    pub unlevered_beta: f64,
    pub market_cap: f64,
    pub price: f64,
    pub shares_outstanding: f64,
    pub risk_free_rate: f64,
    pub equity_risk_premium: f64,

    // Intermediates
    pub amortization: AmortizationSchedule,
    pub fundamentals: Fundamentals,
    pub current_cost_of_capital: CostOfCapital,
    pub stable_cost_of_capital: CostOfCapital,
    pub growth: GrowthAssumptions,
    pub projection: ProjectionResult,

    // Results
    pub enterprise_value: f64,
    pub intrinsic_value: f64,
    pub margin_of_safety: f64,
    pub margin_of_safety_pct: f64,
    pub wealth_profile: WealthProfile,
    pub wealth_spread: f64,
}

/// Run the full valuation pipeline over resolved inputs
///
/// Stages run strictly forward: R&D capitalization, fundamentals
/// normalization, cost of capital (actual beta, then stable beta), growth
/// derivation, projection and discounting, value synthesis.
#[allow(clippy::too_many_arguments)]
pub fn compute_valuation(
    ticker: &str,
    valuation_date: NaiveDate,
    statements: &FinancialStatementSet,
    classification: &IndustryClassification,
    quote: &CompanyQuote,
    spread_table: &CreditSpreadTable,
    config: &ValuationConfig,
) -> Result<ValuationRecord, ValuationError> {
    config.validate()?;
    statements.validate()?;

    let amortization = capitalize_rnd(
        &statements.rnd_expense,
        classification.rnd_amortization_years,
    )?;
    let fundamentals = normalize(statements, &amortization)?;

    let current_cost_of_capital = estimate_cost_of_capital(
        statements,
        fundamentals.book_debt,
        fundamentals.adjusted_book_equity,
        classification.unlevered_beta,
        spread_table,
        config,
    )?;
    let stable_cost_of_capital = estimate_cost_of_capital(
        statements,
        fundamentals.book_debt,
        fundamentals.adjusted_book_equity,
        stable_beta(classification.unlevered_beta),
        spread_table,
        config,
    )?;

    let growth = derive_growth(&fundamentals);
    let wealth_profile = classify_wealth(fundamentals.roic, current_cost_of_capital.wacc);
    let wealth_spread = fundamentals.roic - current_cost_of_capital.wacc;

    let engine = ProjectionEngine::new(config);
    let projection = engine.project(
        fundamentals.adjusted_ebiat,
        &growth,
        &current_cost_of_capital,
        &stable_cost_of_capital,
    )?;

    let enterprise_value = enterprise_value(
        &projection,
        statements.cash_and_equivalents[0],
        fundamentals.book_debt,
    );
    let intrinsic_value = intrinsic_share_value(enterprise_value, quote.shares_outstanding)?;
    let (margin, margin_pct) = margin_of_safety(intrinsic_value, quote.price)?;

    info!(
        "{}: intrinsic value = {:.2} vs price {:.2} (margin {:.2}, {:.1}%)",
        ticker,
        intrinsic_value,
        quote.price,
        margin,
        margin_pct * 100.0
    );

    Ok(ValuationRecord {
        ticker: ticker.to_string(),
        valuation_date,
        company_name: quote.company_name.clone(),
        industry: classification.industry.clone(),
        unlevered_beta: classification.unlevered_beta,
        market_cap: quote.market_cap,
        price: quote.price,
        shares_outstanding: quote.shares_outstanding,
        risk_free_rate: config.risk_free_rate,
        equity_risk_premium: config.equity_risk_premium,
        amortization,
        fundamentals,
        current_cost_of_capital,
        stable_cost_of_capital,
        growth,
        projection,
        enterprise_value,
        intrinsic_value,
        margin_of_safety: margin,
        margin_of_safety_pct: margin_pct,
        wealth_profile,
        wealth_spread,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::sample_statements;
    use approx::assert_relative_eq;

    fn sample_classification() -> IndustryClassification {
        IndustryClassification {
            industry: "Semiconductors".to_string(),
            unlevered_beta: 1.1,
            rnd_amortization_years: 5,
        }
    }

    fn sample_quote() -> CompanyQuote {
        CompanyQuote {
            price: 12.0,
            shares_outstanding: 1000.0,
            market_cap: 12_000.0,
            company_name: "Example Corp".to_string(),
        }
    }

    fn sample_config() -> ValuationConfig {
        ValuationConfig::new(0.045, 0.05)
    }

    fn run() -> Result<ValuationRecord, ValuationError> {
        compute_valuation(
            "EXMP",
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            &sample_statements(),
            &sample_classification(),
            &sample_quote(),
            &CreditSpreadTable::default_table(),
            &sample_config(),
        )
    }

    #[test]
    fn test_pipeline_produces_consistent_record() {
        let record = run().unwrap();

        assert_eq!(record.ticker, "EXMP");
        assert_eq!(record.projection.years.len(), 10);
        assert_relative_eq!(record.fundamentals.effective_tax_rate, 0.26);
        assert_relative_eq!(record.amortization.asset_value, 250.0);

        // Value synthesis ties out against the stored intermediates
        assert_relative_eq!(
            record.enterprise_value,
            record.projection.operating_value() + 400.0 - 600.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            record.intrinsic_value,
            record.enterprise_value / 1000.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            record.margin_of_safety,
            record.intrinsic_value - 12.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(record.wealth_spread, record.fundamentals.roic - record.current_cost_of_capital.wacc);
    }

    #[test]
    fn test_stable_beta_variant_used_for_terminal() {
        let record = run().unwrap();
        // Beta 1.1 maps to a stable beta of 1.0
        assert_relative_eq!(record.current_cost_of_capital.beta, 1.1);
        assert_relative_eq!(record.stable_cost_of_capital.beta, 1.0);
        assert!(record.stable_cost_of_capital.wacc < record.current_cost_of_capital.wacc);
    }

    #[test]
    fn test_wealth_classification_matches_spread_sign() {
        let record = run().unwrap();
        assert_eq!(
            record.wealth_profile.is_creator(),
            record.wealth_spread > 0.0
        );
    }

    #[test]
    fn test_pipeline_is_pure() {
        // Identical inputs yield bit-identical records
        let first = serde_json::to_string(&run().unwrap()).unwrap();
        let second = serde_json::to_string(&run().unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_positive_shares_rejected() {
        let mut quote = sample_quote();
        quote.shares_outstanding = 0.0;
        let result = compute_valuation(
            "EXMP",
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            &sample_statements(),
            &sample_classification(),
            &quote,
            &CreditSpreadTable::default_table(),
            &sample_config(),
        );
        assert!(matches!(
            result,
            Err(ValuationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_degenerate_amortization_window_aborts_run() {
        let mut classification = sample_classification();
        classification.rnd_amortization_years = 1;
        let result = compute_valuation(
            "EXMP",
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            &sample_statements(),
            &classification,
            &sample_quote(),
            &CreditSpreadTable::default_table(),
            &sample_config(),
        );
        assert!(matches!(
            result,
            Err(ValuationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_terminal_condition_enforced_end_to_end() {
        // Push the risk-free rate above any achievable stable WACC
        let mut config = sample_config();
        config.risk_free_rate = 0.5;
        config.equity_risk_premium = -0.5;
        let result = compute_valuation(
            "EXMP",
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            &sample_statements(),
            &sample_classification(),
            &sample_quote(),
            &CreditSpreadTable::default_table(),
            &config,
        );
        assert!(matches!(
            result,
            Err(ValuationError::InvalidConfiguration(_))
        ));
    }
}
