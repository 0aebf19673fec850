//! File-based input loaders
//!
//! Statement histories are read from CSV (one row per fiscal year, most
//! recent first); quotes and classifications are small JSON documents.

use super::data::{CompanyQuote, FinancialStatementSet, IndustryClassification};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// One fiscal year of statement figures as laid out in the input CSV
#[derive(Debug, Deserialize)]
struct StatementRow {
    #[serde(rename = "year")]
    _year: i32,
    ebit: f64,
    income_before_tax: f64,
    tax_expense: f64,
    interest_expense: f64,
    rnd_expense: f64,
    capex: f64,
    depreciation: f64,
    current_assets: f64,
    current_liabilities: f64,
    cash_and_equivalents: f64,
    short_term_debt: f64,
    long_term_debt: f64,
    stockholders_equity: f64,
}

/// Load a statement history from a CSV file
pub fn load_statements<P: AsRef<Path>>(path: P) -> anyhow::Result<FinancialStatementSet> {
    let file = File::open(path)?;
    load_statements_from_reader(file)
}

/// Load a statement history from any reader (useful for tests)
pub fn load_statements_from_reader<R: std::io::Read>(
    reader: R,
) -> anyhow::Result<FinancialStatementSet> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut statements = FinancialStatementSet {
        ebit: Vec::new(),
        income_before_tax: Vec::new(),
        tax_expense: Vec::new(),
        interest_expense: Vec::new(),
        rnd_expense: Vec::new(),
        capex: Vec::new(),
        depreciation: Vec::new(),
        current_assets: Vec::new(),
        current_liabilities: Vec::new(),
        cash_and_equivalents: Vec::new(),
        short_term_debt: Vec::new(),
        long_term_debt: Vec::new(),
        stockholders_equity: Vec::new(),
    };

    for result in csv_reader.deserialize() {
        let row: StatementRow = result?;
        statements.ebit.push(row.ebit);
        statements.income_before_tax.push(row.income_before_tax);
        statements.tax_expense.push(row.tax_expense);
        statements.interest_expense.push(row.interest_expense);
        statements.rnd_expense.push(row.rnd_expense);
        statements.capex.push(row.capex);
        statements.depreciation.push(row.depreciation);
        statements.current_assets.push(row.current_assets);
        statements.current_liabilities.push(row.current_liabilities);
        statements
            .cash_and_equivalents
            .push(row.cash_and_equivalents);
        statements.short_term_debt.push(row.short_term_debt);
        statements.long_term_debt.push(row.long_term_debt);
        statements.stockholders_equity.push(row.stockholders_equity);
    }

    Ok(statements)
}

/// Load a market quote from a JSON file
pub fn load_quote<P: AsRef<Path>>(path: P) -> anyhow::Result<CompanyQuote> {
    let file = File::open(path)?;
    let quote = serde_json::from_reader(file)?;
    Ok(quote)
}

/// Load an industry classification from a JSON file
pub fn load_classification<P: AsRef<Path>>(path: P) -> anyhow::Result<IndustryClassification> {
    let file = File::open(path)?;
    let classification = serde_json::from_reader(file)?;
    Ok(classification)
}
