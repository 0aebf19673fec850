//! Cost of capital estimation
//!
//! CAPM cost of equity, credit-spread-based after-tax cost of debt, and
//! their book-value-weighted average. The estimator runs twice per
//! valuation: once with the company's actual beta for the explicit forecast
//! horizon and once with a mean-reverted "stable" beta for the terminal
//! period.

mod spread;

pub use spread::{CreditSpreadTable, SpreadBand};

use crate::config::ValuationConfig;
use crate::error::ValuationError;
use crate::statements::FinancialStatementSet;
use log::info;
use serde::{Deserialize, Serialize};

/// Interest coverage substituted when interest expense is zero
///
/// Zero interest expense means coverage is undefined; a firm with no debt
/// service deserves the best rating band, so the ratio is forced high enough
/// to land there. This is the only sentinel substitution in the pipeline.
pub const ZERO_INTEREST_EXPENSE_COVERAGE: f64 = 25.0;

/// One cost-of-capital estimate (current-beta or stable-beta variant)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostOfCapital {
    /// Beta the estimate was computed with
    pub beta: f64,

    /// CAPM cost of equity
    pub cost_of_equity: f64,

    /// EBIT / interest expense (or the zero-interest sentinel)
    pub interest_coverage: f64,

    /// Default spread from the credit-spread table
    pub default_spread: f64,

    /// After-tax cost of debt
    pub cost_of_debt: f64,

    /// Book debt weight in the capital structure
    pub percent_debt: f64,

    /// Book equity weight in the capital structure
    pub percent_equity: f64,

    /// Weighted average cost of capital
    pub wacc: f64,
}

/// Estimate the cost of capital for a given beta
pub fn estimate_cost_of_capital(
    statements: &FinancialStatementSet,
    book_debt: f64,
    adjusted_book_equity: f64,
    beta: f64,
    spread_table: &CreditSpreadTable,
    config: &ValuationConfig,
) -> Result<CostOfCapital, ValuationError> {
    let cost_of_equity = config.risk_free_rate + beta * config.equity_risk_premium;

    let interest_expense = statements.interest_expense[0];
    let interest_coverage = if interest_expense == 0.0 {
        ZERO_INTEREST_EXPENSE_COVERAGE
    } else {
        statements.ebit[0] / interest_expense
    };

    let default_spread = spread_table.spread_for(interest_coverage)?;
    let cost_of_debt =
        (config.risk_free_rate + default_spread) * (1.0 - config.marginal_tax_rate);

    let capital_base = adjusted_book_equity + book_debt;
    if capital_base == 0.0 {
        return Err(ValuationError::Undefined("capital structure weights"));
    }
    let percent_debt = book_debt / capital_base;
    let percent_equity = 1.0 - percent_debt;

    let wacc = cost_of_debt * percent_debt + cost_of_equity * percent_equity;

    info!(
        "beta = {:.3}: cost of equity = {:.4}, coverage = {:.2}, spread = {:.4}, \
         cost of debt = {:.4}, debt weight = {:.4}, WACC = {:.4}",
        beta, cost_of_equity, interest_coverage, default_spread, cost_of_debt, percent_debt, wacc
    );

    Ok(CostOfCapital {
        beta,
        cost_of_equity,
        interest_coverage,
        default_spread,
        cost_of_debt,
        percent_debt,
        percent_equity,
        wacc,
    })
}
