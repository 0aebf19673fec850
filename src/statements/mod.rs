//! Resolved company inputs: statement history, quote, classification

mod data;
pub mod loader;

pub use data::{
    CompanyQuote, FinancialStatementSet, IndustryClassification, CAPEX_NORMALIZATION_YEARS,
    MIN_ALIGNED_PERIODS,
};

#[cfg(test)]
pub(crate) use data::sample_statements;
