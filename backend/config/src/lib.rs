//! `docextract-config`: runtime configuration.
//!
//! Provides:
//! - Typed config with defaults (port 3000, fixed Gemini model)
//! - `.env` file loading and environment lookup
//! - Validation with errors and warnings
//! - Redaction for safe startup logging

pub mod defaults;
pub mod env;
pub mod redact;
pub mod schema;
pub mod validation;

pub use env::{from_env, from_env_with, load_env_file, API_KEY_VARS};
pub use redact::redact;
pub use schema::AppConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Result};

/// Validate a freshly loaded config, logging every finding.
///
/// Warnings are logged and ignored; the first error aborts startup.
pub fn ensure_valid(config: AppConfig) -> Result<AppConfig> {
    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if let Some(first) = report.errors.into_iter().next() {
        bail!(first);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_valid_rejects_errors_only() {
        assert!(ensure_valid(AppConfig::default()).is_ok());

        let cfg = AppConfig {
            log_format: "xml".into(),
            ..Default::default()
        };
        let err = ensure_valid(cfg).unwrap_err();
        assert!(err.to_string().contains("logFormat"));
    }
}
