//! Config validation with field paths and readable messages.

use crate::schema::AppConfig;
use thiserror::Error;
use url::Url;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &AppConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_provider(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_server(config: &AppConfig, report: &mut ValidationReport) {
    if config.bind_address.trim().is_empty() {
        report.error("bindAddress", "Bind address cannot be empty");
    }
    if config.port == 0 {
        report.warn("port", "Port 0 binds a random free port");
    }
}

fn validate_provider(config: &AppConfig, report: &mut ValidationReport) {
    if config.api_key.is_none() {
        report.warn("apiKey", "No Gemini API key configured; extraction will not start");
    }

    match Url::parse(&config.provider_base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => report.error(
            "providerBaseUrl",
            format!("Unsupported URL scheme: {}", url.scheme()),
        ),
        Err(e) => report.error("providerBaseUrl", format!("Invalid URL format: {e}")),
    }
}

fn validate_logging(config: &AppConfig, report: &mut ValidationReport) {
    if !matches!(
        config.log_format.to_ascii_lowercase().as_str(),
        "pretty" | "text" | "json"
    ) {
        report.error(
            "logFormat",
            format!("Unknown log format \"{}\" (expected pretty or json)", config.log_format),
        );
    }
}
