//! Tax Refund CLI
//!
//! Command-line interface for estimating property tax refunds from saved
//! comparables data

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tax_refund::property::load_comparables;
use tax_refund::runner::load_requests;
use tax_refund::service::resolve_target;
use tax_refund::{RefundConfig, RefundResult, RefundRunner};

#[derive(Parser)]
#[command(name = "refund", version, about = "Estimate property tax refunds from comparables")]
struct Cli {
    /// Interest rate table (Year,Rate CSV); defaults to RATES_PATH or data/interest_rates.csv
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    /// Evaluation date (YYYY-MM-DD); defaults to today
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate the refund for one PIN
    Estimate {
        /// Target PIN
        #[arg(long)]
        pin: String,

        /// Comparables JSON keyed by PIN
        #[arg(long)]
        comparables: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Estimate refunds for a JSON array of {pin, comparables} requests
    Batch {
        #[arg(long)]
        input: PathBuf,

        /// Summary CSV output path
        #[arg(long, default_value = "refund_output.csv")]
        output: PathBuf,
    },
}

/// Row of the batch summary CSV
#[derive(serde::Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "PIN")]
    pin: &'a str,
    #[serde(rename = "Outcome")]
    outcome: &'static str,
    #[serde(rename = "FairValue")]
    fair_value: Option<f64>,
    #[serde(rename = "YearsEligible")]
    years_eligible: u32,
    #[serde(rename = "TotalRefund")]
    total_refund: f64,
}

fn print_result(result: &RefundResult) {
    println!("PIN: {}", result.property_id);
    println!("  Outcome: {}", result.outcome.as_str());
    if let Some(fair_value) = result.fair_value {
        println!("  Fair Value: ${:.2}", fair_value);
    }
    println!("  Years Eligible: {}", result.years_eligible);
    for year in &result.years {
        println!("    {}: ${:.2}", year.year, year.present_value);
    }
    println!("  Total Refund: ${:.2}", result.total_refund);
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = RefundConfig::from_env();
    let rates_path = cli.rates.unwrap_or(config.rates_path);
    let evaluation_date = cli.as_of.unwrap_or_else(|| Local::now().date_naive());

    let runner = RefundRunner::from_csv(&rates_path)
        .with_context(|| format!("loading rate table {}", rates_path.display()))?;
    log::info!("Evaluating as of {}", evaluation_date);

    match cli.command {
        Command::Estimate { pin, comparables, json } => {
            let set = load_comparables(&comparables)
                .with_context(|| format!("loading comparables {}", comparables.display()))?;
            let target = resolve_target(&pin, &set);
            let result = runner.engine().compute_refund(&target, &set, evaluation_date);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
        }
        Command::Batch { input, output } => {
            let requests = load_requests(&input)
                .with_context(|| format!("loading requests {}", input.display()))?;
            println!("Loaded {} requests", requests.len());

            let results = runner.run_batch(&requests, evaluation_date);

            let mut writer = csv::Writer::from_path(&output)
                .with_context(|| format!("creating {}", output.display()))?;
            for result in &results {
                writer.serialize(SummaryRow {
                    pin: result.property_id.as_str(),
                    outcome: result.outcome.as_str(),
                    fair_value: result.fair_value,
                    years_eligible: result.years_eligible,
                    total_refund: result.total_refund,
                })?;
            }
            writer.flush()?;

            let refundable = results.iter().filter(|r| r.is_refundable()).count();
            let total: f64 = results.iter().map(|r| r.total_refund).sum();
            println!("\nSummary:");
            println!("  Requests: {}", results.len());
            println!("  Refundable: {}", refundable);
            println!("  Total Refunds: ${:.2}", total);
            println!("\nFull results written to: {}", output.display());
        }
    }

    Ok(())
}
