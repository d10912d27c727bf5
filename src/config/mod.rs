//! Configuration parsing and types.

pub mod env;
pub mod parser;
pub mod types;
pub mod validate;

use std::path::Path;

use tracing::info;

use crate::common::error::ConfigError;

pub use parser::{load_config, load_config_str};
pub use types::*;
pub use validate::validate_config;

/// Load a config file, apply environment overrides and validate.
///
/// A missing file falls back to defaults; every setting has one.
pub fn load_and_validate(path: &str) -> Result<Config, ConfigError> {
    let config = if Path::new(path).exists() {
        load_config(path)?
    } else {
        info!("No config file at {}, using defaults", path);
        Config::default()
    };

    let config = env::apply_env_overrides(config);
    validate_config(&config)?;
    Ok(config)
}
