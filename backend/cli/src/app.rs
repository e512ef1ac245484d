//! Startup wiring: config → provider → agent → service.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use docextract_agent::{ExtractionService, ReceiptAgent};
use docextract_config::AppConfig;
use docextract_core::LlmProvider;
use docextract_logging::{LogFormat, LoggerOptions};
use docextract_providers::GeminiProvider;

/// Logger settings derived from config.
pub fn logger_options(config: &AppConfig) -> LoggerOptions {
    LoggerOptions {
        level: config.log_level.clone(),
        format: config.log_format.parse().unwrap_or(LogFormat::Pretty),
        log_dir: config.log_dir.clone(),
    }
}

/// Construct the model client once. Fails without an API key.
pub fn build_provider(config: &AppConfig) -> Result<Arc<dyn LlmProvider>> {
    let api_key = config.require_api_key()?;
    let provider = GeminiProvider::new(api_key).with_base_url(&config.provider_base_url);
    info!(provider = "gemini", model = %config.model, "Model client configured");
    Ok(Arc::new(provider))
}

pub fn build_service(config: &AppConfig, provider: Arc<dyn LlmProvider>) -> ExtractionService {
    let agent = ReceiptAgent::new(provider, config.model.clone());
    ExtractionService::new(Arc::new(agent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_requires_api_key() {
        let err = build_provider(&AppConfig::default()).err().unwrap();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_service_uses_configured_model() {
        let config = AppConfig {
            api_key: Some("test-key".into()),
            ..Default::default()
        };
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.name(), "gemini");

        let service = build_service(&config, provider);
        assert_eq!(service.agent().model(), "gemini-2.0-flash-lite");
        assert_eq!(service.agent().provider_name(), "gemini");
    }

    #[test]
    fn test_logger_options_fall_back_to_pretty() {
        let config = AppConfig {
            log_format: "json".into(),
            ..Default::default()
        };
        assert_eq!(logger_options(&config).format, LogFormat::Json);

        let config = AppConfig {
            log_format: "xml".into(),
            ..Default::default()
        };
        assert_eq!(logger_options(&config).format, LogFormat::Pretty);
    }
}
