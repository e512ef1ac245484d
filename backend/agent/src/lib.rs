//! Docextract extraction agent
//!
//! Prompt template, the receipt agent that calls the model provider, and the
//! service layer that turns agent failures into the client-facing error.

pub mod prompt;
pub mod receipt_agent;
pub mod service;

pub use prompt::RECEIPT_PROMPT;
pub use receipt_agent::{RECEIPT_CONTENT_TYPE, ReceiptAgent};
pub use service::ExtractionService;
