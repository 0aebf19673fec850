//! Projected cashflow rows and the aggregate projection result

use serde::{Deserialize, Serialize};

/// One projected forecast year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearCashflow {
    /// Forecast year index (0 = first projected year)
    pub year: u32,

    /// Projected adjusted EBIAT
    pub ebiat: f64,

    /// Projected free cash flow to the firm
    pub fcff: f64,

    /// End-of-year discount factor applied to this year's FCFF
    pub discount_factor: f64,

    /// Present value of this year's FCFF
    pub fcff_pv: f64,
}

/// Projected and discounted cash flows over the explicit horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Per-year projected figures, year 0 first
    pub years: Vec<YearCashflow>,

    /// Present value of the explicit-horizon FCFF
    pub explicit_fcff_pv: f64,

    /// Present value of the terminal perpetuity
    pub terminal_value_pv: f64,
}

impl ProjectionResult {
    /// Combined present value of explicit and terminal cash flows
    pub fn operating_value(&self) -> f64 {
        self.explicit_fcff_pv + self.terminal_value_pv
    }

    /// FCFF of the final explicit year (the terminal-value base)
    pub fn final_fcff(&self) -> f64 {
        self.years.last().map(|row| row.fcff).unwrap_or(0.0)
    }
}
