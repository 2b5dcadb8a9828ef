//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;
use tracing::debug;

use super::types::AppConfig;
use crate::common::errors::Result;

/// Environment variables consulted for the insight API key, in order
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (`APP__SETTINGS__LOG_LEVEL` style)
/// 2. Configuration file (TOML format)
/// 3. Default values (the built-in fee table)
///
/// Fee schedules are validated before the configuration is returned.
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            debug!("Reading configuration file {}", path);
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    let mut config: AppConfig = builder.build()?.try_deserialize()?;

    if config.insight.api_key.is_none() {
        config.insight.api_key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .filter(|key| !key.trim().is_empty());
    }

    config.fees.validate()?;
    Ok(config)
}

/// Parse configuration from a TOML string (no environment overlay)
pub fn load_from_str(toml: &str) -> Result<AppConfig> {
    let config: AppConfig = Config::builder()
        .add_source(File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize()?;

    config.fees.validate()?;
    Ok(config)
}
