//! Sustainable growth and wealth-creation classification

use crate::fundamentals::Fundamentals;
use log::info;
use serde::{Deserialize, Serialize};

/// Growth inputs for the explicit forecast horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthAssumptions {
    /// Firm reinvestment / adjusted EBIAT
    pub reinvestment_rate: f64,

    /// Return on invested capital
    pub roic: f64,

    /// Sustainable growth rate (reinvestment rate x ROIC)
    pub growth_rate: f64,
}

/// Whether the firm earns more or less than its cost of capital
///
/// Informational only; the classification does not change any figure in the
/// valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WealthProfile {
    /// ROIC exceeds the current WACC
    Creator,
    /// ROIC at or below the current WACC
    Destroyer,
}

impl WealthProfile {
    pub fn is_creator(&self) -> bool {
        matches!(self, WealthProfile::Creator)
    }
}

/// Map the company's beta to the terminal-period beta
///
/// Betas mean-revert over long horizons, so extreme values are pulled toward
/// 1.0 for the terminal assumptions.
pub fn stable_beta(unlevered_beta: f64) -> f64 {
    if unlevered_beta < 0.5 {
        0.8
    } else if unlevered_beta > 1.5 {
        1.2
    } else {
        1.0
    }
}

/// Derive growth assumptions from the normalized fundamentals
pub fn derive_growth(fundamentals: &Fundamentals) -> GrowthAssumptions {
    let growth_rate = fundamentals.reinvestment_rate * fundamentals.roic;
    info!("growth rate = {:.4}", growth_rate);

    GrowthAssumptions {
        reinvestment_rate: fundamentals.reinvestment_rate,
        roic: fundamentals.roic,
        growth_rate,
    }
}

/// Classify the firm against its current cost of capital
pub fn classify_wealth(roic: f64, current_wacc: f64) -> WealthProfile {
    if roic > current_wacc {
        WealthProfile::Creator
    } else {
        WealthProfile::Destroyer
    }
}
