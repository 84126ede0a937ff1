// src/config.rs
use crate::error::{ErrorContext, Result};
use crate::types::{ApiConfig, Config, Credentials, DorkerError};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "google_dorker.toml";
pub const API_KEYS_ENV: &str = "GOOGLE_API_KEYS";
pub const CSE_IDS_ENV: &str = "GOOGLE_CSE_IDS";

/// Places searched for the config file, in priority order.
pub fn config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(home) = env::var_os("HOME") {
        locations.push(Path::new(&home).join(".config").join(CONFIG_FILE_NAME));
    }
    locations.push(Path::new("/etc").join(CONFIG_FILE_NAME));
    locations
}

/// First candidate that exists on disk.
pub fn find_config(candidates: &[PathBuf]) -> Result<PathBuf> {
    match candidates.iter().find(|path| path.exists()) {
        Some(path) => {
            let absolute = fs::canonicalize(path).unwrap_or_else(|_| path.clone());
            debug!("Loading configuration from: {}", absolute.display());
            Ok(absolute)
        }
        None => {
            let checked: Vec<String> = candidates
                .iter()
                .map(|path| format!("- {}", path.display()))
                .collect();
            Err(DorkerError::ConfigError(format!(
                "Config file not found. Checked locations:\n{}",
                checked.join("\n")
            )))
        }
    }
}

/// Read the credential pools from `path`, apply env overrides and validate.
pub fn load_api_config(path: &Path) -> Result<ApiConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let mut config: ApiConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config file".to_string())?;

    apply_env_overrides(&mut config, |name| env::var(name).ok());
    validate_api_config(&config)?;

    Ok(config)
}

/// Comma-separated lists from the environment replace the file pools.
pub fn apply_env_overrides<F>(config: &mut ApiConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(keys) = lookup(API_KEYS_ENV) {
        config.google_api = split_list(&keys);
    }
    if let Some(ids) = lookup(CSE_IDS_ENV) {
        config.google_cse_id = split_list(&ids);
    }
    config.google_api.retain(|key| !key.trim().is_empty());
    config.google_cse_id.retain(|id| !id.trim().is_empty());
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

pub fn validate_api_config(config: &ApiConfig) -> Result<()> {
    if config.google_api.is_empty() || config.google_cse_id.is_empty() {
        return Err(DorkerError::ConfigError(
            "Google API key or CSE ID missing from config".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_config(config: &Config) -> Result<()> {
    if config.concurrency == 0 {
        return Err(DorkerError::ConfigError(
            "Concurrency must be greater than 0".to_string(),
        ));
    }
    if config.timeout.is_zero() {
        return Err(DorkerError::ConfigError(
            "Timeout must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Pick one API key and one engine id, each uniformly at random.
pub fn pick_credentials<R: Rng + ?Sized>(config: &ApiConfig, rng: &mut R) -> Result<Credentials> {
    validate_api_config(config)?;

    let api_key = config.google_api.choose(rng);
    let engine_id = config.google_cse_id.choose(rng);

    match (api_key, engine_id) {
        (Some(api_key), Some(engine_id)) => Ok(Credentials {
            api_key: api_key.clone(),
            engine_id: engine_id.clone(),
        }),
        _ => Err(DorkerError::ConfigError(
            "Google API key or CSE ID missing from config".to_string(),
        )),
    }
}
