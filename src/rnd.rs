//! R&D capitalization
//!
//! Accounting rules expense R&D as incurred, which understates both earnings
//! and invested capital for research-heavy firms. This module rebuilds the
//! R&D asset by amortizing each historical year's expense straight-line over
//! an industry-specific window.

use crate::error::ValuationError;
use log::debug;
use serde::{Deserialize, Serialize};

/// Straight-line amortization schedule over the R&D expense history
///
/// Entries are indexed by years-before-present (0 = most recent fiscal
/// year). The current year's expense has not begun amortizing, so it
/// contributes to the asset value at full weight but not to the current-year
/// amortization charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Raw R&D expense per processed year
    pub expense: Vec<f64>,

    /// Fraction of each year's expense still unamortized
    pub unamortized_fraction: Vec<f64>,

    /// Unamortized dollar amount per year
    pub unamortized_amount: Vec<f64>,

    /// Total capitalized R&D asset (sum of unamortized amounts)
    pub asset_value: f64,

    /// Amortization charged against the current year
    pub current_year_amortization: f64,
}

impl AmortizationSchedule {
    /// Number of historical years the schedule covers
    pub fn years_processed(&self) -> usize {
        self.expense.len()
    }

    /// True when no R&D history was available to capitalize
    pub fn is_empty(&self) -> bool {
        self.expense.is_empty()
    }

    /// Most recent year's R&D expense (zero for an empty schedule)
    pub fn current_year_expense(&self) -> f64 {
        self.expense.first().copied().unwrap_or(0.0)
    }
}

/// Build the amortization schedule for an R&D expense history
///
/// `rnd_expense` is ordered most recent first; `amortization_years` is the
/// industry window N. Year `y` retains `1 - y/(N-1)` of its expense, so the
/// year that is N-1 years old has amortized to zero. An empty history yields
/// an empty schedule; downstream ratio computations reject it as
/// insufficient data rather than treating the adjustments as zero.
pub fn capitalize_rnd(
    rnd_expense: &[f64],
    amortization_years: u32,
) -> Result<AmortizationSchedule, ValuationError> {
    if amortization_years <= 1 {
        return Err(ValuationError::InvalidConfiguration(format!(
            "R&D amortization window of {} years leaves the annual fraction undefined",
            amortization_years
        )));
    }

    let fraction = 1.0 / (amortization_years - 1) as f64;
    let years_to_process = rnd_expense.len().min(amortization_years as usize);

    // Amortization hitting the current year comes from prior years only;
    // year 0's expense starts amortizing next year.
    let current_year_amortization: f64 = rnd_expense
        .iter()
        .take(years_to_process)
        .skip(1)
        .map(|expense| expense * fraction)
        .sum();

    let mut expense = Vec::with_capacity(years_to_process);
    let mut unamortized_fraction = Vec::with_capacity(years_to_process);
    let mut unamortized_amount = Vec::with_capacity(years_to_process);
    let mut asset_value = 0.0;

    for (year, &year_expense) in rnd_expense[..years_to_process].iter().enumerate() {
        let fraction_left = 1.0 - fraction * year as f64;
        let amount_left = year_expense * fraction_left;

        expense.push(year_expense);
        unamortized_fraction.push(fraction_left);
        unamortized_amount.push(amount_left);
        asset_value += amount_left;
    }

    debug!(
        "R&D asset value = {:.2}, current-year amortization = {:.2} ({} years, window {})",
        asset_value, current_year_amortization, years_to_process, amortization_years
    );

    Ok(AmortizationSchedule {
        expense,
        unamortized_fraction,
        unamortized_amount,
        asset_value,
        current_year_amortization,
    })
}
