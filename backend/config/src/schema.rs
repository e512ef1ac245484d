//! Typed runtime configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::defaults::{
    DEFAULT_BIND_ADDRESS, DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL, DEFAULT_MODEL, DEFAULT_PORT,
    DEFAULT_PROVIDER_BASE_URL,
};

/// Docextract runtime configuration, built once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Gemini API key
    pub api_key: Option<String>,
    /// Generative Language API root
    pub provider_base_url: String,
    /// Model identifier bound at startup
    pub model: String,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// `pretty` or `json`
    pub log_format: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            api_key: None,
            provider_base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: DEFAULT_LOG_FORMAT.to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// `host:port` string for the HTTP listener.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// The API key, or an error naming the variables that were checked.
    pub fn require_api_key(&self) -> anyhow::Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "no Gemini API key configured; set one of {}",
                crate::env::API_KEY_VARS.join(", ")
            )
        })
    }
}
