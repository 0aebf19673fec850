//! Value a block of companies from a resolved-inputs JSON file
//!
//! The input file holds an array of fully resolved `CompanyInputs`; runs are
//! independent, so the block is valued in parallel.

use anyhow::Context;
use clap::Parser;
use fcff_valuation::{CompanyInputs, CreditSpreadTable, ValuationConfig, ValuationRunner};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "value_block", about = "Batch FCFF valuation over resolved inputs")]
struct Args {
    /// JSON array of resolved company inputs
    #[arg(long)]
    companies: PathBuf,

    /// JSON run configuration (rates, tax, horizon)
    #[arg(long)]
    config: PathBuf,

    /// CSV credit-spread table; the built-in table is used when omitted
    #[arg(long)]
    spread_table: Option<PathBuf>,

    /// JSON file to write the successful records into
    #[arg(long, default_value = "valuations.json")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let file = std::fs::File::open(&args.companies)
        .with_context(|| format!("opening {}", args.companies.display()))?;
    let companies: Vec<CompanyInputs> =
        serde_json::from_reader(file).context("parsing company inputs")?;
    println!("Loaded {} companies in {:?}", companies.len(), start.elapsed());

    let config = ValuationConfig::from_json_path(&args.config)?;
    let runner = match &args.spread_table {
        Some(path) => {
            ValuationRunner::with_spread_table(config, CreditSpreadTable::from_csv_path(path)?)
        }
        None => ValuationRunner::new(config),
    };

    let run_start = Instant::now();
    let results = runner.run_batch(&companies);
    println!("Valued {} companies in {:?}\n", results.len(), run_start.elapsed());

    println!("{:>8} {:>14} {:>12} {:>12} {:>10}", "Ticker", "Intrinsic", "Price", "Margin", "Margin %");
    println!("{}", "-".repeat(62));

    let mut records = Vec::new();
    for (ticker, result) in results {
        match result {
            Ok(record) => {
                println!(
                    "{:>8} {:>14.2} {:>12.2} {:>12.2} {:>9.1}%",
                    ticker,
                    record.intrinsic_value,
                    record.price,
                    record.margin_of_safety,
                    record.margin_of_safety_pct * 100.0
                );
                records.push(record);
            }
            Err(err) => println!("{:>8} failed: {}", ticker, err),
        }
    }

    let json = serde_json::to_string_pretty(&records)?;
    std::fs::write(&args.output, json)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("\n{} records written to: {}", records.len(), args.output.display());

    Ok(())
}
