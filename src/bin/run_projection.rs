//! Run the month-by-month projection and export the report table
//!
//! Parameters come from the built-in defaults, then an optional JSON config
//! file, then individual flags.

use std::path::PathBuf;
use std::time::Instant;

use acquisition_projection::{
    config::load_config,
    report::{month_labels, write_csv, ReportTable},
    ModelConfig, ProjectionEngine, ProjectionResult, ProjectionSummary,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(about = "Project revenue, client acquisition and cash month by month")]
struct Args {
    /// JSON model config; omitted fields use the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of months to project
    #[arg(long)]
    periods: Option<u32>,

    /// First month of the projection (YYYY-MM-DD)
    #[arg(long)]
    start_month: Option<NaiveDate>,

    #[arg(long)]
    base_revenue: Option<f64>,

    #[arg(long)]
    client_value: Option<f64>,

    #[arg(long)]
    cost_to_win: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    starting_cash: Option<f64>,

    #[arg(long)]
    starting_clients: Option<u64>,

    #[arg(long, allow_negative_numbers = true)]
    cash_floor: Option<f64>,

    #[arg(long)]
    payment_delay: Option<u32>,

    #[arg(long)]
    recognition_window: Option<u32>,

    /// CSV output path
    #[arg(long, default_value = "Financial_model.csv")]
    output: PathBuf,

    /// Skip writing the CSV file
    #[arg(long)]
    no_export: bool,

    /// Print the unrounded result as JSON instead of the table
    #[arg(long)]
    json: bool,
}

impl Args {
    fn model_config(&self) -> Result<ModelConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ModelConfig::default(),
        };

        if let Some(v) = self.periods { config.period_count = v; }
        if let Some(v) = self.start_month { config.start_month = v; }
        if let Some(v) = self.base_revenue { config.base_recurring_revenue = v; }
        if let Some(v) = self.client_value { config.client_annual_value = v; }
        if let Some(v) = self.cost_to_win { config.cost_to_win = v; }
        if let Some(v) = self.starting_cash { config.starting_cash = v; }
        if let Some(v) = self.starting_clients { config.starting_client_count = v; }
        if let Some(v) = self.cash_floor { config.cash_floor = v; }
        if let Some(v) = self.payment_delay { config.payment_delay = v; }
        if let Some(v) = self.recognition_window { config.recognition_window = v; }

        Ok(config)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a ModelConfig,
    summary: ProjectionSummary,
    periods: &'a ProjectionResult,
}

fn horizon_title(periods: u32, labels: &[String]) -> String {
    let span = if periods % 12 == 0 {
        format!("{}-year", periods / 12)
    } else {
        format!("{}-month", periods)
    };
    match (labels.first(), labels.last()) {
        (Some(first), Some(last)) => {
            format!("{} month-by-month model (columns = months {} .. {})", span, first, last)
        }
        _ => format!("{} month-by-month model", span),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.model_config()?;

    let start = Instant::now();
    let engine = ProjectionEngine::new(config).context("Invalid model configuration")?;
    let result = engine.project();
    let config = engine.config();
    let summary = result.summary();

    if args.json {
        let report = JsonReport { config, summary, periods: &result };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let labels = month_labels(config.start_month, config.period_count);
        let table = ReportTable::build(&result, &labels);

        println!("{}\n", horizon_title(config.period_count, &labels));
        print!("{}", table.render());

        println!("\nSummary:");
        println!("  Clients won:        {} ({} at close)", summary.total_acquired, summary.ending_total_clients);
        println!("  Ending cash:        {:.2}", summary.ending_cash_balance);
        println!("  Lowest cash:        {:.2} in {}",
                 summary.min_cash_balance,
                 labels.get(summary.min_cash_period as usize).map(String::as_str).unwrap_or("-"));
        println!("  Net profit:         {:.2}", summary.cumulative_net_profit);
        println!("  S&M planned/spent:  {:.2} / {:.2}",
                 summary.cumulative_planned_marketing, summary.cumulative_actual_marketing);
        println!("  Cash-limited months: {}", summary.cash_constrained_periods);

        if !args.no_export {
            write_csv(&table, &args.output)
                .with_context(|| format!("Failed to write {}", args.output.display()))?;
            println!("\nSaved model to: {}", args.output.display());
        }
    }

    log::info!("Total time: {:?}", start.elapsed());
    Ok(())
}
