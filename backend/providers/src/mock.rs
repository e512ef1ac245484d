use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use docextract_core::{LlmProvider, LlmRequest, LlmResponse};

enum Outcome {
    Output(Option<Value>),
    Failure(String),
}

/// A mock provider that returns canned outputs and records what it was asked.
pub struct MockProvider {
    name: String,
    outcome: Outcome,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Output(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with this structured output.
    pub fn with_output(mut self, output: Value) -> Self {
        self.outcome = Outcome::Output(Some(output));
        self
    }

    /// Fail every request with this message.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.outcome = Outcome::Failure(message.into());
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, req: &LlmRequest) -> Result<LlmResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(req.clone());

        match &self.outcome {
            Outcome::Output(output) => Ok(LlmResponse {
                output: output.clone(),
                provider: self.name.clone(),
                model: req.model.clone(),
                latency_ms: 0,
            }),
            Outcome::Failure(message) => Err(anyhow!(message.clone())),
        }
    }
}
