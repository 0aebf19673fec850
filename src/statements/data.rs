//! Input data structures resolved by external collaborators
//!
//! All figures are annual, index 0 = most recent fiscal year, and every list
//! in a statement set must align by fiscal-year offset. The core never
//! mutates these snapshots.

use crate::error::ValuationError;
use serde::{Deserialize, Serialize};

/// Minimum number of aligned annual periods required to run a valuation
pub const MIN_ALIGNED_PERIODS: usize = 4;

/// Number of years averaged for normalized capex
pub const CAPEX_NORMALIZATION_YEARS: usize = 5;

/// Up to five years of aligned annual statement figures for one company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialStatementSet {
    // Income statement
    pub ebit: Vec<f64>,
    pub income_before_tax: Vec<f64>,
    pub tax_expense: Vec<f64>,
    pub interest_expense: Vec<f64>,
    pub rnd_expense: Vec<f64>,

    // Cash flow statement
    pub capex: Vec<f64>,
    pub depreciation: Vec<f64>,

    // Balance sheet
    pub current_assets: Vec<f64>,
    pub current_liabilities: Vec<f64>,
    pub cash_and_equivalents: Vec<f64>,
    pub short_term_debt: Vec<f64>,
    pub long_term_debt: Vec<f64>,
    pub stockholders_equity: Vec<f64>,
}

impl FinancialStatementSet {
    /// Number of aligned annual periods available
    pub fn years(&self) -> usize {
        self.ebit.len()
    }

    /// Check alignment and minimum history
    ///
    /// Every list must have the same length and at least
    /// [`MIN_ALIGNED_PERIODS`] entries; misaligned indices would silently
    /// pair figures from different fiscal years.
    pub fn validate(&self) -> Result<(), ValuationError> {
        let n = self.ebit.len();
        let aligned = [
            self.income_before_tax.len(),
            self.tax_expense.len(),
            self.interest_expense.len(),
            self.rnd_expense.len(),
            self.capex.len(),
            self.depreciation.len(),
            self.current_assets.len(),
            self.current_liabilities.len(),
            self.cash_and_equivalents.len(),
            self.short_term_debt.len(),
            self.long_term_debt.len(),
            self.stockholders_equity.len(),
        ]
        .iter()
        .all(|&len| len == n);

        if !aligned {
            return Err(ValuationError::InsufficientData(
                "statement lists are not aligned by fiscal year".to_string(),
            ));
        }
        if n < MIN_ALIGNED_PERIODS {
            return Err(ValuationError::InsufficientData(format!(
                "{} annual periods available, {} required",
                n, MIN_ALIGNED_PERIODS
            )));
        }
        Ok(())
    }
}

/// Market quote data for one company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyQuote {
    /// Current share price
    pub price: f64,

    /// Shares outstanding
    pub shares_outstanding: f64,

    /// Market capitalization
    pub market_cap: f64,

    /// Display name
    pub company_name: String,
}

/// Industry classification and the parameters keyed off it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryClassification {
    /// Industry group name
    pub industry: String,

    /// Industry-average unlevered beta (corrected for cash)
    pub unlevered_beta: f64,

    /// Industry R&D amortization window in years
    pub rnd_amortization_years: u32,
}

/// Five-year statement fixture shared by unit tests across the crate
#[cfg(test)]
pub(crate) fn sample_statements() -> FinancialStatementSet {
    FinancialStatementSet {
        ebit: vec![1000.0, 950.0, 900.0, 850.0, 800.0],
        income_before_tax: vec![900.0, 860.0, 820.0, 780.0, 740.0],
        tax_expense: vec![234.0, 223.6, 213.2, 202.8, 192.4],
        interest_expense: vec![50.0, 48.0, 46.0, 44.0, 42.0],
        rnd_expense: vec![100.0, 100.0, 100.0, 100.0, 100.0],
        capex: vec![200.0, 190.0, 180.0, 170.0, 160.0],
        depreciation: vec![150.0, 145.0, 140.0, 135.0, 130.0],
        current_assets: vec![1200.0, 1100.0, 1000.0, 950.0, 900.0],
        current_liabilities: vec![800.0, 750.0, 700.0, 680.0, 660.0],
        cash_and_equivalents: vec![400.0, 380.0, 360.0, 340.0, 320.0],
        short_term_debt: vec![100.0, 95.0, 90.0, 85.0, 80.0],
        long_term_debt: vec![500.0, 520.0, 540.0, 560.0, 580.0],
        stockholders_equity: vec![2000.0, 1900.0, 1800.0, 1700.0, 1600.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_statements_validate() {
        assert!(sample_statements().validate().is_ok());
    }

    #[test]
    fn test_misaligned_statements_rejected() {
        let mut statements = sample_statements();
        statements.capex.pop();
        assert!(matches!(
            statements.validate(),
            Err(ValuationError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_short_history_rejected() {
        let mut statements = sample_statements();
        for list in [
            &mut statements.ebit,
            &mut statements.income_before_tax,
            &mut statements.tax_expense,
            &mut statements.interest_expense,
            &mut statements.rnd_expense,
            &mut statements.capex,
            &mut statements.depreciation,
            &mut statements.current_assets,
            &mut statements.current_liabilities,
            &mut statements.cash_and_equivalents,
            &mut statements.short_term_debt,
            &mut statements.long_term_debt,
            &mut statements.stockholders_equity,
        ] {
            list.truncate(3);
        }
        assert!(matches!(
            statements.validate(),
            Err(ValuationError::InsufficientData(_))
        ));
    }
}
