//! External collaborator interfaces
//!
//! The core is a pure function of resolved inputs; everything that touches
//! the outside world (statement APIs, quote feeds, macro data, persistence)
//! sits behind these traits. Implementations map their transport failures to
//! `ValuationError::UpstreamUnavailable`.

use crate::config::ValuationConfig;
use crate::error::ValuationError;
use crate::runner::CompanyInputs;
use crate::statements::{CompanyQuote, FinancialStatementSet, IndustryClassification};
use crate::valuation::ValuationRecord;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Resolves a ticker to its aligned annual statement history
pub trait StatementProvider {
    fn statements(&self, ticker: &str) -> Result<FinancialStatementSet, ValuationError>;
}

/// Resolves a ticker to its industry and the industry's model parameters
pub trait ClassificationProvider {
    fn classification(&self, ticker: &str) -> Result<IndustryClassification, ValuationError>;
}

/// Resolves current market-wide rates
pub trait MacroProvider {
    fn risk_free_rate(&self) -> Result<f64, ValuationError>;
    fn equity_risk_premium(&self) -> Result<f64, ValuationError>;
}

/// Resolves a ticker to its current market quote
pub trait QuoteProvider {
    fn quote(&self, ticker: &str) -> Result<CompanyQuote, ValuationError>;
}

/// Persists valuation records keyed by (ticker, valuation date)
///
/// A second record for the same key replaces the first (upsert).
pub trait ValuationSink {
    fn persist(&mut self, record: &ValuationRecord) -> Result<(), ValuationError>;
}

/// Resolve every per-company input for one ticker
///
/// Orchestration helper for callers wiring live providers to the pipeline;
/// the first collaborator failure aborts the resolution.
pub fn resolve_company<S, C, Q>(
    ticker: &str,
    valuation_date: NaiveDate,
    statement_provider: &S,
    classification_provider: &C,
    quote_provider: &Q,
) -> Result<CompanyInputs, ValuationError>
where
    S: StatementProvider,
    C: ClassificationProvider,
    Q: QuoteProvider,
{
    Ok(CompanyInputs {
        ticker: ticker.to_string(),
        valuation_date,
        statements: statement_provider.statements(ticker)?,
        classification: classification_provider.classification(ticker)?,
        quote: quote_provider.quote(ticker)?,
    })
}

/// Build a run configuration from a macro provider's resolved rates
pub fn config_from_macro<M: MacroProvider>(
    provider: &M,
    growth_period_years: u32,
) -> Result<ValuationConfig, ValuationError> {
    let mut config = ValuationConfig::new(
        provider.risk_free_rate()?,
        provider.equity_risk_premium()?,
    );
    config.growth_period_years = growth_period_years;
    Ok(config)
}

/// JSON-file sink with upsert-on-conflict semantics
///
/// Records live in a single JSON array; persisting a record whose
/// (ticker, valuation date) already exists replaces the stored copy.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Read all records currently stored (an absent file is empty)
    pub fn records(&self) -> Result<Vec<ValuationRecord>, ValuationError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = std::fs::File::open(&self.path).map_err(|e| {
            ValuationError::UpstreamUnavailable(format!(
                "cannot open {}: {}",
                self.path.display(),
                e
            ))
        })?;
        serde_json::from_reader(file).map_err(|e| {
            ValuationError::UpstreamUnavailable(format!(
                "cannot parse {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl ValuationSink for JsonFileSink {
    fn persist(&mut self, record: &ValuationRecord) -> Result<(), ValuationError> {
        let mut records = self.records()?;

        match records.iter_mut().find(|existing| {
            existing.ticker == record.ticker && existing.valuation_date == record.valuation_date
        }) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }

        let json = serde_json::to_string_pretty(&records).map_err(|e| {
            ValuationError::UpstreamUnavailable(format!("cannot serialize records: {}", e))
        })?;
        std::fs::write(&self.path, json).map_err(|e| {
            ValuationError::UpstreamUnavailable(format!(
                "cannot write {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMacro;

    impl MacroProvider for FixedMacro {
        fn risk_free_rate(&self) -> Result<f64, ValuationError> {
            Ok(0.045)
        }
        fn equity_risk_premium(&self) -> Result<f64, ValuationError> {
            Ok(0.0457)
        }
    }

    #[test]
    fn test_config_from_macro() {
        let config = config_from_macro(&FixedMacro, 8).unwrap();
        assert_eq!(config.risk_free_rate, 0.045);
        assert_eq!(config.equity_risk_premium, 0.0457);
        assert_eq!(config.growth_period_years, 8);
    }

    #[test]
    fn test_missing_sink_file_reads_empty() {
        let sink = JsonFileSink::new("/nonexistent/dir/valuations.json");
        assert!(sink.records().unwrap().is_empty());
    }

    struct FixtureProviders;

    impl StatementProvider for FixtureProviders {
        fn statements(&self, _ticker: &str) -> Result<FinancialStatementSet, ValuationError> {
            Ok(crate::statements::sample_statements())
        }
    }

    impl ClassificationProvider for FixtureProviders {
        fn classification(
            &self,
            _ticker: &str,
        ) -> Result<IndustryClassification, ValuationError> {
            Ok(IndustryClassification {
                industry: "Semiconductors".to_string(),
                unlevered_beta: 1.1,
                rnd_amortization_years: 5,
            })
        }
    }

    impl QuoteProvider for FixtureProviders {
        fn quote(&self, _ticker: &str) -> Result<CompanyQuote, ValuationError> {
            Ok(CompanyQuote {
                price: 12.0,
                shares_outstanding: 1000.0,
                market_cap: 12_000.0,
                company_name: "Example Corp".to_string(),
            })
        }
    }

    #[test]
    fn test_resolve_company_assembles_inputs() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let inputs =
            resolve_company("EXMP", date, &FixtureProviders, &FixtureProviders, &FixtureProviders)
                .unwrap();

        assert_eq!(inputs.ticker, "EXMP");
        assert_eq!(inputs.valuation_date, date);
        assert_eq!(inputs.quote.company_name, "Example Corp");
        assert!(inputs.statements.validate().is_ok());
    }

    #[test]
    fn test_sink_upserts_on_conflict() {
        let path = std::env::temp_dir().join("fcff_valuation_sink_upsert_test.json");
        let _ = std::fs::remove_file(&path);
        let mut sink = JsonFileSink::new(path.clone());

        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let inputs =
            resolve_company("EXMP", date, &FixtureProviders, &FixtureProviders, &FixtureProviders)
                .unwrap();
        let runner = crate::runner::ValuationRunner::new(ValuationConfig::new(0.045, 0.05));

        let first = runner.run(&inputs).unwrap();
        sink.persist(&first).unwrap();

        let mut second = first.clone();
        second.price = 14.0;
        sink.persist(&second).unwrap();

        // Same (ticker, date) key: the stored record was replaced, not appended
        let records = sink.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, 14.0);

        let _ = std::fs::remove_file(&path);
    }
}
