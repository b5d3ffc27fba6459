//! Model configuration: parameters, allocation ratios, validation and loading

mod error;
mod model;
pub mod loader;

pub use error::ConfigError;
pub use model::{AllocationRatios, ModelConfig, CLIENT_CAPACITY, MAX_AMOUNT};
pub use loader::{load_config, load_config_from_reader};
