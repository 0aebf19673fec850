//! FCFF Valuation - intrinsic-value estimation via discounted cash flows
//!
//! This library provides:
//! - R&D capitalization into an amortized asset
//! - Fundamentals normalization (adjusted earnings, reinvestment, ROIC)
//! - Cost of capital estimation (CAPM equity, credit-spread debt, WACC)
//! - Multi-year FCFF projection, discounting, and terminal value
//! - Margin-of-safety synthesis against the market price

pub mod capital;
pub mod config;
pub mod error;
pub mod fundamentals;
pub mod growth;
pub mod projection;
pub mod providers;
pub mod rnd;
pub mod runner;
pub mod statements;
pub mod valuation;

// Re-export commonly used types
pub use capital::{CostOfCapital, CreditSpreadTable};
pub use config::ValuationConfig;
pub use error::ValuationError;
pub use runner::{CompanyInputs, ValuationRunner};
pub use statements::{CompanyQuote, FinancialStatementSet, IndustryClassification};
pub use valuation::{compute_valuation, ValuationRecord};
