//! Default values for every optional setting.

pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

pub const DEFAULT_PROVIDER_BASE_URL: &str = docextract_providers::gemini::DEFAULT_BASE_URL;

/// Fixed model identifier. Not read from the environment.
pub const DEFAULT_MODEL: &str = docextract_providers::GEMINI_20_FLASH_LITE;

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_LOG_FORMAT: &str = "pretty";
