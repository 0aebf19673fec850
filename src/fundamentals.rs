//! Fundamentals normalization
//!
//! Pure functions turning the raw statement history and the R&D amortization
//! schedule into the adjusted earnings, capital, and reinvestment figures the
//! rest of the pipeline consumes.
//!
//! Cash and short-term debt are excluded from working capital throughout:
//! both are financing items, not operating ones.

use crate::error::ValuationError;
use crate::rnd::AmortizationSchedule;
use crate::statements::{FinancialStatementSet, CAPEX_NORMALIZATION_YEARS};
use log::info;
use serde::{Deserialize, Serialize};

/// Normalized and R&D-adjusted fundamentals for the most recent fiscal year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fundamentals {
    /// Effective tax rate (tax expense / income before tax)
    pub effective_tax_rate: f64,

    /// Mean of the most recent annual capex figures
    pub normalized_capex: f64,

    /// Year-over-year change in non-cash working capital
    pub change_in_ncwc: f64,

    /// Earnings before interest, after taxes (unadjusted)
    pub ebiat: f64,

    /// Current-year free cash flow to the firm
    pub fcff: f64,

    /// EBIAT with R&D expense added back and amortization charged
    pub adjusted_ebiat: f64,

    /// Book equity plus the capitalized R&D asset
    pub adjusted_book_equity: f64,

    /// Short-term plus long-term book debt
    pub book_debt: f64,

    /// Capex, working-capital, and net R&D investment for the year
    pub firm_reinvestment: f64,

    /// Firm reinvestment / adjusted EBIAT
    pub reinvestment_rate: f64,

    /// Adjusted EBIAT / (adjusted equity + debt - cash)
    pub roic: f64,
}

/// Effective tax rate from the most recent year
pub fn effective_tax_rate(statements: &FinancialStatementSet) -> Result<f64, ValuationError> {
    let income_before_tax = statements.income_before_tax[0];
    if income_before_tax == 0.0 {
        return Err(ValuationError::Undefined("effective tax rate"));
    }
    Ok(statements.tax_expense[0] / income_before_tax)
}

/// Mean of the most recent annual capex figures
///
/// A single year's capex is lumpy; averaging over the available history (up
/// to five years) smooths reinvestment through the capital cycle.
///
/// The capex history must be non-empty; run the statement set through
/// [`FinancialStatementSet::validate`] first, as the pipeline does.
pub fn normalized_capex(statements: &FinancialStatementSet) -> f64 {
    let years = statements.capex.len().min(CAPEX_NORMALIZATION_YEARS);
    statements.capex[..years].iter().sum::<f64>() / years as f64
}

/// Year-over-year change in non-cash working capital
pub fn change_in_ncwc(statements: &FinancialStatementSet) -> f64 {
    let ncwc_at = |i: usize| {
        (statements.current_assets[i] - statements.cash_and_equivalents[i])
            - (statements.current_liabilities[i] - statements.short_term_debt[i])
    };
    ncwc_at(0) - ncwc_at(1)
}

/// Derive the full set of normalized fundamentals
///
/// An empty amortization schedule means no R&D history was available; the
/// adjusted ratios would silently degenerate to their unadjusted values, so
/// the whole normalization is rejected as insufficient data instead.
pub fn normalize(
    statements: &FinancialStatementSet,
    schedule: &AmortizationSchedule,
) -> Result<Fundamentals, ValuationError> {
    if schedule.is_empty() {
        return Err(ValuationError::InsufficientData(
            "no R&D expense history to capitalize".to_string(),
        ));
    }

    let effective_tax_rate = effective_tax_rate(statements)?;
    let normalized_capex = normalized_capex(statements);
    let change_in_ncwc = change_in_ncwc(statements);
    let depreciation = statements.depreciation[0];

    let ebiat = statements.ebit[0] * (1.0 - effective_tax_rate);
    let fcff = ebiat - normalized_capex + depreciation - change_in_ncwc;

    let current_rnd = schedule.current_year_expense();
    let adjusted_ebiat = ebiat + current_rnd - schedule.current_year_amortization;
    let adjusted_book_equity = statements.stockholders_equity[0] + schedule.asset_value;
    let book_debt = statements.short_term_debt[0] + statements.long_term_debt[0];

    let firm_reinvestment = normalized_capex - depreciation + change_in_ncwc + current_rnd
        - schedule.current_year_amortization;

    if adjusted_ebiat == 0.0 {
        return Err(ValuationError::Undefined("reinvestment rate"));
    }
    let reinvestment_rate = firm_reinvestment / adjusted_ebiat;

    let invested_capital = adjusted_book_equity + book_debt - statements.cash_and_equivalents[0];
    if invested_capital == 0.0 {
        return Err(ValuationError::Undefined("return on invested capital"));
    }
    let roic = adjusted_ebiat / invested_capital;

    info!(
        "effective tax rate = {:.4}, EBIAT = {:.2}, adjusted EBIAT = {:.2}, FCFF = {:.2}",
        effective_tax_rate, ebiat, adjusted_ebiat, fcff
    );
    info!(
        "firm reinvestment = {:.2}, reinvestment rate = {:.4}, ROIC = {:.4}",
        firm_reinvestment, reinvestment_rate, roic
    );

    Ok(Fundamentals {
        effective_tax_rate,
        normalized_capex,
        change_in_ncwc,
        ebiat,
        fcff,
        adjusted_ebiat,
        adjusted_book_equity,
        book_debt,
        firm_reinvestment,
        reinvestment_rate,
        roic,
    })
}
