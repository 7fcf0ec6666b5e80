// src/config.rs

//! Configuration loading for hosts.

use std::path::Path;

use crate::error::Result;
use crate::models::{API_BASE_URL_ENV, Config};

/// Load configuration from a TOML file, apply the `API_BASE_URL`
/// environment override and validate the result.
///
/// A missing file falls back to defaults; an unreadable or invalid one is
/// an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) if path.exists() => {
            log::debug!("Loading configuration from {}", path.display());
            Config::load(path)?
        }
        Some(path) => {
            log::warn!("Config file {} not found. Using defaults.", path.display());
            Config::default()
        }
        None => Config::default(),
    };
    resolve(config, std::env::var(API_BASE_URL_ENV).ok())
}

fn resolve(config: Config, env_base_url: Option<String>) -> Result<Config> {
    let config = config.with_base_url_override(env_base_url);
    config.validate()?;
    Ok(config)
}
