//! Parallel scenario runs and summary output

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use super::Scenario;
use crate::config::{ConfigError, ModelConfig};
use crate::projection::{ProjectionEngine, ProjectionSummary};
use crate::report::ReportError;

/// Result of one scenario: a summary, or the reason its config was rejected
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<ProjectionSummary, ConfigError>,
}

/// Flat CSV line for one outcome
#[derive(Debug, Serialize)]
struct OutcomeRecord<'a> {
    name: &'a str,
    status: &'static str,
    periods: Option<u32>,
    total_acquired: Option<u64>,
    ending_total_clients: Option<u64>,
    ending_cash_balance: Option<f64>,
    min_cash_balance: Option<f64>,
    min_cash_period: Option<u32>,
    cumulative_net_profit: Option<f64>,
    cumulative_actual_marketing: Option<f64>,
    cash_constrained_periods: Option<u32>,
    error: Option<String>,
}

impl<'a> From<&'a ScenarioOutcome> for OutcomeRecord<'a> {
    fn from(outcome: &'a ScenarioOutcome) -> Self {
        match &outcome.result {
            Ok(s) => OutcomeRecord {
                name: &outcome.name,
                status: "ok",
                periods: Some(s.periods),
                total_acquired: Some(s.total_acquired),
                ending_total_clients: Some(s.ending_total_clients),
                ending_cash_balance: Some(s.ending_cash_balance),
                min_cash_balance: Some(s.min_cash_balance),
                min_cash_period: Some(s.min_cash_period),
                cumulative_net_profit: Some(s.cumulative_net_profit),
                cumulative_actual_marketing: Some(s.cumulative_actual_marketing),
                cash_constrained_periods: Some(s.cash_constrained_periods),
                error: None,
            },
            Err(e) => OutcomeRecord {
                name: &outcome.name,
                status: "invalid",
                periods: None,
                total_acquired: None,
                ending_total_clients: None,
                ending_cash_balance: None,
                min_cash_balance: None,
                min_cash_period: None,
                cumulative_net_profit: None,
                cumulative_actual_marketing: None,
                cash_constrained_periods: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Project every scenario against `base`, in parallel
///
/// Each scenario is validated on its own; a rejected config is reported in
/// its outcome and does not stop the rest. Output order matches input order.
pub fn run_sweep(base: &ModelConfig, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
    info!("Running {} scenarios", scenarios.len());

    scenarios
        .par_iter()
        .map(|scenario| {
            let result = ProjectionEngine::new(scenario.apply(base))
                .map(|engine| engine.project().summary());
            if let Err(e) = &result {
                warn!("Scenario '{}' rejected: {}", scenario.name, e);
            }
            ScenarioOutcome {
                name: scenario.name.clone(),
                result,
            }
        })
        .collect()
}

/// Write one summary line per outcome to a CSV file
pub fn write_outcomes<P: AsRef<Path>>(path: P, outcomes: &[ScenarioOutcome]) -> Result<(), ReportError> {
    let file = File::create(path.as_ref())?;
    write_outcomes_to_writer(file, outcomes)
}

pub fn write_outcomes_to_writer<W: Write>(writer: W, outcomes: &[ScenarioOutcome]) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for outcome in outcomes {
        wtr.serialize(OutcomeRecord::from(outcome))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(name: &str) -> Scenario {
        Scenario { name: name.to_string(), ..Default::default() }
    }

    #[test]
    fn test_sweep_matches_direct_projection() {
        let base = ModelConfig::default();
        let outcomes = run_sweep(&base, &[scenario("baseline")]);

        let direct = ProjectionEngine::new(base).unwrap().project().summary();
        let swept = outcomes[0].result.as_ref().unwrap();
        assert_eq!(swept.total_acquired, direct.total_acquired);
        assert_eq!(swept.ending_cash_balance, direct.ending_cash_balance);
    }

    #[test]
    fn test_invalid_scenario_does_not_stop_sweep() {
        let base = ModelConfig::default();
        let scenarios = vec![
            scenario("baseline"),
            Scenario { cost_to_win: Some(0.0), ..scenario("free") },
            Scenario { cost_to_win: Some(2_000.0), ..scenario("pricey") },
        ];
        let outcomes = run_sweep(&base, &scenarios);

        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["baseline", "free", "pricey"]);
        assert!(outcomes[0].result.is_ok());
        assert!(matches!(outcomes[1].result, Err(ConfigError::NonPositiveCostToWin(_))));

        let cheap = outcomes[0].result.as_ref().unwrap();
        let pricey = outcomes[2].result.as_ref().unwrap();
        assert!(pricey.total_acquired < cheap.total_acquired);
    }

    #[test]
    fn test_outcome_csv() {
        let base = ModelConfig::default();
        let scenarios = vec![
            scenario("baseline"),
            Scenario { period_count: Some(0), ..scenario("empty") },
        ];
        let outcomes = run_sweep(&base, &scenarios);

        let mut buf = Vec::new();
        write_outcomes_to_writer(&mut buf, &outcomes).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("name,status,periods,total_acquired"));
        assert!(lines[1].starts_with("baseline,ok,24,"));
        assert!(lines[2].starts_with("empty,invalid,,"));
        assert!(lines[2].ends_with("period count must be at least 1"));
    }
}
