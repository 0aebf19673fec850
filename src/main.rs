//! FCFF Valuation CLI
//!
//! Values a single company from pre-resolved input files and prints the
//! projection alongside the intrinsic-value summary.

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use fcff_valuation::providers::{JsonFileSink, ValuationSink};
use fcff_valuation::statements::loader;
use fcff_valuation::{compute_valuation, CreditSpreadTable, ValuationConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fcff_valuation", version, about = "FCFF discounted-cash-flow valuation")]
struct Args {
    /// Ticker symbol to value
    #[arg(long)]
    ticker: String,

    /// CSV statement history (one row per fiscal year, most recent first)
    #[arg(long)]
    statements: PathBuf,

    /// JSON market quote
    #[arg(long)]
    quote: PathBuf,

    /// JSON industry classification
    #[arg(long)]
    classification: PathBuf,

    /// JSON run configuration (rates, tax, horizon)
    #[arg(long)]
    config: PathBuf,

    /// CSV credit-spread table; the built-in table is used when omitted
    #[arg(long)]
    spread_table: Option<PathBuf>,

    /// Growth period override in years
    #[arg(long)]
    growth_period: Option<u32>,

    /// JSON file to upsert the valuation record into
    #[arg(long)]
    sink: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let statements = loader::load_statements(&args.statements)
        .with_context(|| format!("loading statements from {}", args.statements.display()))?;
    let quote = loader::load_quote(&args.quote)
        .with_context(|| format!("loading quote from {}", args.quote.display()))?;
    let classification = loader::load_classification(&args.classification)
        .with_context(|| format!("loading classification from {}", args.classification.display()))?;

    let mut config = ValuationConfig::from_json_path(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;
    if let Some(years) = args.growth_period {
        config.growth_period_years = years;
    }

    let spread_table = match &args.spread_table {
        Some(path) => CreditSpreadTable::from_csv_path(path)
            .with_context(|| format!("loading spread table from {}", path.display()))?,
        None => CreditSpreadTable::default_table(),
    };

    let valuation_date = Local::now().date_naive();
    let record = compute_valuation(
        &args.ticker,
        valuation_date,
        &statements,
        &classification,
        &quote,
        &spread_table,
        &config,
    )?;

    println!("FCFF Valuation v{}", env!("CARGO_PKG_VERSION"));
    println!("====================\n");
    println!("{} ({}) - {}", record.company_name, record.ticker, record.industry);
    println!("  Valuation Date: {}", record.valuation_date);
    println!("  Unlevered Beta: {:.3} (stable {:.3})", record.unlevered_beta, record.stable_cost_of_capital.beta);
    println!("  Risk-Free Rate: {:.2}%", record.risk_free_rate * 100.0);
    println!("  Equity Premium: {:.2}%", record.equity_risk_premium * 100.0);
    println!();

    println!("Projected FCFF ({} years):", record.projection.years.len());
    println!("{:>5} {:>16} {:>16} {:>16}", "Year", "EBIAT", "FCFF", "PV(FCFF)");
    println!("{}", "-".repeat(56));
    for row in &record.projection.years {
        println!(
            "{:>5} {:>16.2} {:>16.2} {:>16.2}",
            row.year + 1,
            row.ebiat,
            row.fcff,
            row.fcff_pv
        );
    }

    println!("\nSummary:");
    println!("  Effective Tax Rate:   {:>12.4}", record.fundamentals.effective_tax_rate);
    println!("  Adjusted EBIAT:       {:>12.2}", record.fundamentals.adjusted_ebiat);
    println!("  Reinvestment Rate:    {:>12.4}", record.growth.reinvestment_rate);
    println!("  ROIC:                 {:>12.4}", record.growth.roic);
    println!("  Growth Rate:          {:>12.4}", record.growth.growth_rate);
    println!("  WACC (current):       {:>12.4}", record.current_cost_of_capital.wacc);
    println!("  WACC (stable):        {:>12.4}", record.stable_cost_of_capital.wacc);
    println!("  Explicit FCFF PV:     {:>12.2}", record.projection.explicit_fcff_pv);
    println!("  Terminal Value PV:    {:>12.2}", record.projection.terminal_value_pv);
    println!("  Enterprise Value:     {:>12.2}", record.enterprise_value);
    println!("  Intrinsic Value:      {:>12.2}", record.intrinsic_value);
    println!("  Market Price:         {:>12.2}", record.price);
    println!(
        "  Margin of Safety:     {:>12.2} ({:.1}%)",
        record.margin_of_safety,
        record.margin_of_safety_pct * 100.0
    );
    println!(
        "  Classification:       {:>12}",
        if record.wealth_profile.is_creator() { "wealth creator" } else { "wealth destroyer" }
    );

    if let Some(path) = &args.sink {
        let mut sink = JsonFileSink::new(path.clone());
        sink.persist(&record)?;
        println!("\nRecord persisted to: {}", path.display());
    }

    Ok(())
}
