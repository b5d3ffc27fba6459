//! Month-by-month projection of recurring revenue, client acquisition and
//! cash for a small business.
//!
//! Each period's marketing budget buys whole clients at a fixed cost, but only
//! as many as the cash floor allows. New clients are recognized as revenue
//! over a trailing window and pay their annual value as a delayed lump sum,
//! which feeds back into later periods' budgets and headroom.

pub mod config;
pub mod projection;
pub mod report;
pub mod scenario;

pub use config::{AllocationRatios, ConfigError, ModelConfig};
pub use projection::{Metric, PeriodRow, ProjectionEngine, ProjectionResult, ProjectionSummary};
