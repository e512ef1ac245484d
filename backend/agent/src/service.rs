//! Extraction service.
//!
//! Sits between the HTTP layer and the agent. Every agent failure leaves this
//! layer as [`DocextractError::ExtractionFailed`]; the detail goes to the log.

use std::sync::Arc;

use tracing::error;

use docextract_core::{DocextractError, Receipt};
use docextract_logging::redact_sensitive_data;

use crate::receipt_agent::ReceiptAgent;

#[derive(Clone)]
pub struct ExtractionService {
    agent: Arc<ReceiptAgent>,
}

impl ExtractionService {
    pub fn new(agent: Arc<ReceiptAgent>) -> Self {
        Self { agent }
    }

    pub fn agent(&self) -> &ReceiptAgent {
        &self.agent
    }

    pub async fn extract_receipt_data(&self, image_url: &str) -> Result<Receipt, DocextractError> {
        match self.agent.extract(image_url).await {
            Ok(receipt) => Ok(receipt),
            Err(e) => {
                let kind = e.kind();
                error!(
                    kind = %kind,
                    image_url = %redact_sensitive_data(image_url),
                    error = %redact_sensitive_data(&e.to_string()),
                    "Receipt extraction failed"
                );
                Err(DocextractError::ExtractionFailed(kind))
            }
        }
    }
}
