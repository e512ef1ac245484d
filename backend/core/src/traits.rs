use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for generative model providers used by the extraction agent.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "gemini", "mock").
    fn name(&self) -> &str;

    /// Send a generation request and return the structured output, if any.
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// One segment of a multimodal prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    Text { text: String },
    /// A media reference by URL. The provider fetches it.
    Media { url: String, content_type: String },
}

impl PromptPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn media(url: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::Media {
            url: url.into(),
            content_type: content_type.into(),
        }
    }
}

/// Request to an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub model: String,
    /// Prompt segments, sent in order.
    pub parts: Vec<PromptPart>,
    /// Shape the output should follow. `None` asks for free text.
    pub output_schema: Option<Value>,
}

/// Response from an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Parsed structured output. `None` when the model produced nothing usable.
    pub output: Option<Value>,
    pub provider: String,
    pub model: String,
    pub latency_ms: u64,
}
