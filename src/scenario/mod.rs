//! Scenario sweeps: run the projection across a batch of parameter overrides

mod data;
pub mod loader;
pub mod sweep;

pub use data::Scenario;
pub use loader::{load_scenarios, load_scenarios_from_reader};
pub use sweep::{run_sweep, write_outcomes, write_outcomes_to_writer, ScenarioOutcome};
