//! Structured logging for Docextract.
//!
//! Console output (pretty or JSON), optional rolling NDJSON files, and
//! redaction of credentials before they reach a log line.

pub mod logger;
pub mod redact;

pub use logger::{LogFormat, LoggerOptions, init_logger};
pub use redact::redact_sensitive_data;
