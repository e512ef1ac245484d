//! Receipt extraction agent.
//!
//! Composes the instruction prompt, the image reference, and the receipt
//! schema into one provider call, then validates what comes back.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use docextract_core::{
    DocextractError, LlmProvider, LlmRequest, PromptPart, Receipt, receipt_schema,
    validate_receipt,
};

use docextract_logging::redact_sensitive_data;

use crate::prompt::RECEIPT_PROMPT;

/// Content type declared for every receipt image.
pub const RECEIPT_CONTENT_TYPE: &str = "image/jpeg";

/// Runs receipt extraction against an injected model provider.
pub struct ReceiptAgent {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl ReceiptAgent {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Extract a [`Receipt`] from the image at `image_url`.
    ///
    /// One provider call, no retry. The URL is handed over as-is; fetching
    /// and decoding it is the provider's job.
    #[instrument(
        skip(self, image_url),
        fields(
            image_url = %redact_sensitive_data(image_url),
            provider = %self.provider.name(),
            model = %self.model,
        )
    )]
    pub async fn extract(&self, image_url: &str) -> Result<Receipt, DocextractError> {
        let request = LlmRequest {
            model: self.model.clone(),
            parts: vec![
                PromptPart::text(RECEIPT_PROMPT),
                PromptPart::media(image_url, RECEIPT_CONTENT_TYPE),
            ],
            output_schema: Some(receipt_schema()),
        };

        let response = self.provider.generate(&request).await.map_err(|e| {
            DocextractError::LlmError {
                provider: self.provider.name().to_string(),
                message: format!("{e:#}"),
            }
        })?;

        debug!(latency_ms = response.latency_ms, "Provider responded");

        let output = response.output.ok_or_else(|| DocextractError::MissingOutput {
            provider: response.provider.clone(),
        })?;

        let receipt = validate_receipt(&output)?;
        info!(items = receipt.items.len(), "Receipt extracted");
        Ok(receipt)
    }
}
