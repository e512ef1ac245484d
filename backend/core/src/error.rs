use std::fmt;

use thiserror::Error;

use crate::schema::SchemaViolation;

/// Message returned to clients for every extraction failure.
pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract data from receipt.";

/// Top-level error type for the Docextract runtime.
#[derive(Debug, Error)]
pub enum DocextractError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("LLM provider error ({provider}): {message}")]
    LlmError { provider: String, message: String },

    #[error("LLM provider {provider} returned no structured output")]
    MissingOutput { provider: String },

    #[error("model output does not match the receipt schema: {0}")]
    Schema(#[from] SchemaViolation),

    /// Client-facing failure. The kind survives for logs and tests; the
    /// message never carries the underlying detail.
    #[error("{}", EXTRACTION_FAILED_MESSAGE)]
    ExtractionFailed(FailureKind),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DocextractError {
    /// Classify this error for the extraction failure path.
    pub fn kind(&self) -> FailureKind {
        match self {
            DocextractError::LlmError { .. } => FailureKind::Provider,
            DocextractError::MissingOutput { .. } => FailureKind::MissingOutput,
            DocextractError::Schema(_) => FailureKind::Schema,
            DocextractError::ExtractionFailed(kind) => *kind,
            DocextractError::InvalidInput(_) | DocextractError::Other(_) => FailureKind::Other,
        }
    }
}

/// Why an extraction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network failure, provider rejection, or unfetchable media.
    Provider,
    /// The provider answered without a structured output.
    MissingOutput,
    /// The structured output did not match the receipt schema.
    Schema,
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Provider => write!(f, "provider"),
            FailureKind::MissingOutput => write!(f, "missing_output"),
            FailureKind::Schema => write!(f, "schema"),
            FailureKind::Other => write!(f, "other"),
        }
    }
}
