//! Environment loading.
//!
//! An optional env file is applied to the process first (variables already
//! set win), then [`AppConfig`] is read from the environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::defaults::DEFAULT_PORT;
use crate::schema::AppConfig;

pub const PORT_VAR: &str = "PORT";
pub const HOST_VAR: &str = "HOST";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const LOG_LEVEL_VAR: &str = "RUST_LOG";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";
pub const LOG_DIR_VAR: &str = "LOG_DIR";

/// API key variables, in lookup order.
pub const API_KEY_VARS: [&str; 3] = ["GEMINI_API_KEY", "GOOGLE_API_KEY", "GOOGLE_GENAI_API_KEY"];

/// Load an env file into the process environment.
///
/// With `None`, looks for `.env` in the working directory and its parents.
/// A missing default file is not an error; a missing explicit path is.
/// Returns the path that was loaded, if any.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load env file {}", path.display()))?;
            debug!(path = %path.display(), "Loaded env file");
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenvy::dotenv() {
            Ok(found) => {
                debug!(path = %found.display(), "Loaded env file");
                Ok(Some(found))
            }
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(e).context("Failed to load .env file"),
        },
    }
}

/// Build the config from the current process environment.
pub fn from_env() -> Result<AppConfig> {
    from_env_with(&std::env::vars().collect())
}

/// Build the config from a provided map (useful for testing).
pub fn from_env_with(env: &HashMap<String, String>) -> Result<AppConfig> {
    let defaults = AppConfig::default();
    let get = |name: &str| env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

    let port = match get(PORT_VAR) {
        Some(raw) => raw
            .parse::<u16>()
            .with_context(|| format!("{PORT_VAR} must be a port number, got \"{raw}\""))?,
        None => DEFAULT_PORT,
    };

    let api_key = API_KEY_VARS
        .iter()
        .find_map(|name| get(*name))
        .map(str::to_string);

    Ok(AppConfig {
        bind_address: get(HOST_VAR).map_or(defaults.bind_address, str::to_string),
        port,
        api_key,
        provider_base_url: get(BASE_URL_VAR).map_or(defaults.provider_base_url, str::to_string),
        model: defaults.model,
        log_level: get(LOG_LEVEL_VAR).map_or(defaults.log_level, str::to_string),
        log_format: get(LOG_FORMAT_VAR).map_or(defaults.log_format, str::to_string),
        log_dir: get(LOG_DIR_VAR).map(PathBuf::from),
    })
}
