//! Structured Logger
//!
//! Wraps `tracing` with environment-based level control, a console layer in
//! pretty or JSON form, and an optional daily-rotated NDJSON file.

use std::path::PathBuf;
use std::str::FromStr;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Console output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format \"{other}\" (expected pretty or json)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggerOptions {
    /// Filter used when `RUST_LOG` is unset, e.g. `info` or `docextract=debug`.
    pub level: String,
    pub format: LogFormat,
    /// Directory for `docextract.log.YYYY-MM-DD` files. `None` disables file output.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            log_dir: None,
        }
    }
}

/// Initialize the global structured logger.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logger(options: &LoggerOptions) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&options.level));

    let console_layer = match options.format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_ansi(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .with_ansi(false)
            .boxed(),
    };

    let file_layer = options.log_dir.as_ref().map(|dir| {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "docextract.log");
        fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" Pretty ".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let options = LoggerOptions::default();
        init_logger(&options);
        init_logger(&options);
        tracing::info!("logger initialised");
    }
}
