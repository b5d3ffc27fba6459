//! Load a model configuration from JSON
//!
//! Missing fields fall back to the built-in defaults, so a file may hold only
//! the parameters being changed. The loaded config is validated before it is
//! returned.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;

use super::{ConfigError, ModelConfig};

/// Load and validate a config from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ModelConfig, ConfigError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let config = load_config_from_reader(BufReader::new(file))?;
    info!("Loaded model config from {}", path.display());
    Ok(config)
}

/// Load and validate a config from any JSON reader
pub fn load_config_from_reader<R: Read>(reader: R) -> Result<ModelConfig, ConfigError> {
    let config: ModelConfig = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok(config)
}
