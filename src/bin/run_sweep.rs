//! Run the projection for every scenario in a CSV file
//!
//! Outputs one summary line per scenario for side-by-side comparison

use std::path::PathBuf;
use std::time::Instant;

use acquisition_projection::{
    config::load_config,
    scenario::{load_scenarios, run_sweep, write_outcomes},
    ModelConfig,
};
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(about = "Project a batch of scenarios against a base model config")]
struct Args {
    /// Scenario CSV: a name column plus optional override columns
    #[arg(long, default_value = "data/scenarios.csv")]
    scenarios: PathBuf,

    /// Base JSON model config; defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "scenario_summary.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let base = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ModelConfig::default(),
    };
    let scenarios = load_scenarios(&args.scenarios)
        .with_context(|| format!("Failed to load scenarios from {}", args.scenarios.display()))?;

    let start = Instant::now();
    let outcomes = run_sweep(&base, &scenarios);
    println!("Projected {} scenarios in {:?}", outcomes.len(), start.elapsed());

    println!("{:<24} {:>8} {:>10} {:>14} {:>14} {:>14}",
             "Scenario", "Won", "Clients", "Ending cash", "Lowest cash", "Net profit");
    for outcome in &outcomes {
        match &outcome.result {
            Ok(s) => println!("{:<24} {:>8} {:>10} {:>14.2} {:>14.2} {:>14.2}",
                              outcome.name,
                              s.total_acquired,
                              s.ending_total_clients,
                              s.ending_cash_balance,
                              s.min_cash_balance,
                              s.cumulative_net_profit),
            Err(e) => println!("{:<24} invalid: {}", outcome.name, e),
        }
    }

    write_outcomes(&args.output, &outcomes)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("\nOutput written to {}", args.output.display());
    Ok(())
}
