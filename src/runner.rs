//! Batch valuation runner
//!
//! Holds the shared run inputs (spread table, configuration) once and values
//! many companies against them. Runs are independent pure computations, so
//! batches parallelize trivially.

use crate::capital::CreditSpreadTable;
use crate::config::ValuationConfig;
use crate::error::ValuationError;
use crate::statements::{CompanyQuote, FinancialStatementSet, IndustryClassification};
use crate::valuation::{compute_valuation, ValuationRecord};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Fully resolved inputs for one company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyInputs {
    pub ticker: String,
    pub valuation_date: NaiveDate,
    pub statements: FinancialStatementSet,
    pub classification: IndustryClassification,
    pub quote: CompanyQuote,
}

/// Pre-loaded runner for valuing one or many companies
#[derive(Debug, Clone)]
pub struct ValuationRunner {
    spread_table: CreditSpreadTable,
    config: ValuationConfig,
}

impl ValuationRunner {
    /// Create a runner with the default credit-spread table
    pub fn new(config: ValuationConfig) -> Self {
        Self {
            spread_table: CreditSpreadTable::default_table(),
            config,
        }
    }

    /// Create a runner with a specific spread table
    pub fn with_spread_table(config: ValuationConfig, spread_table: CreditSpreadTable) -> Self {
        Self {
            spread_table,
            config,
        }
    }

    /// Value a single company
    pub fn run(&self, company: &CompanyInputs) -> Result<ValuationRecord, ValuationError> {
        compute_valuation(
            &company.ticker,
            company.valuation_date,
            &company.statements,
            &company.classification,
            &company.quote,
            &self.spread_table,
            &self.config,
        )
    }

    /// Value many companies in parallel
    ///
    /// Each result is paired with its ticker; a failed company does not
    /// abort the rest of the batch.
    pub fn run_batch(
        &self,
        companies: &[CompanyInputs],
    ) -> Vec<(String, Result<ValuationRecord, ValuationError>)> {
        companies
            .par_iter()
            .map(|company| (company.ticker.clone(), self.run(company)))
            .collect()
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    pub fn spread_table(&self) -> &CreditSpreadTable {
        &self.spread_table
    }
}
