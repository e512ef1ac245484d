pub mod error;
pub mod schema;
pub mod traits;
pub mod types;

pub use error::{DocextractError, FailureKind};
pub use schema::{receipt_schema, validate_receipt, SchemaViolation};
pub use traits::{LlmProvider, LlmRequest, LlmResponse, PromptPart};
pub use types::{ExtractionRequest, LineItem, Receipt};
