//! Projection engine: the cash-floor constrained acquisition recurrence

mod state;
mod engine;
mod cashflows;

pub use state::{AcquisitionHistory, ProjectionState};
pub use engine::ProjectionEngine;
pub use cashflows::{Metric, PeriodRow, ProjectionResult, ProjectionSummary};
