use std::time::Instant;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use docextract_core::{LlmProvider, LlmRequest, LlmResponse, PromptPart};
use docextract_logging::redact_sensitive_data;

/// Model bound at startup. Not configurable at runtime.
pub const GEMINI_20_FLASH_LITE: &str = "gemini-2.0-flash-lite";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini provider over the Generative Language REST API.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Download a media reference and inline it, as the API does not fetch
    /// arbitrary URLs itself.
    async fn fetch_media(&self, url: &str, content_type: &str) -> Result<Part> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch media from {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Media fetch from {} returned {}", url, status);
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read media body from {url}"))?;
        debug!(
            url = %redact_sensitive_data(url),
            bytes = bytes.len(),
            "Fetched media for prompt"
        );

        Ok(Part::InlineData {
            inline_data: InlineData {
                mime_type: content_type.to_string(),
                data: STANDARD.encode(&bytes),
            },
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse> {
        let start = Instant::now();

        let mut parts = Vec::with_capacity(request.parts.len());
        for part in &request.parts {
            match part {
                PromptPart::Text { text } => parts.push(Part::Text { text: text.clone() }),
                PromptPart::Media { url, content_type } => {
                    parts.push(self.fetch_media(url, content_type).await?)
                }
            }
        }

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: request.output_schema.as_ref().map(|schema| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: to_gemini_schema(schema),
            }),
        };

        info!(model = %request.model, "Sending request to Gemini");

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, request.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("Gemini HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            bail!("Gemini returned {}: {}", status, error_body);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        let candidate = parsed.candidates.into_iter().next();
        if let Some(reason) = candidate.as_ref().and_then(|c| c.finish_reason.as_deref()) {
            debug!(finish_reason = %reason, "Gemini candidate finished");
        }

        let text: String = candidate
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let output = if text.trim().is_empty() {
            None
        } else if request.output_schema.is_some() {
            let json = serde_json::from_str(strip_code_fence(&text))
                .context("Gemini output is not valid JSON")?;
            Some(json)
        } else {
            Some(Value::String(text))
        };

        let latency_ms = start.elapsed().as_millis() as u64;

        Ok(LlmResponse {
            output,
            provider: "gemini".to_string(),
            model: request.model.clone(),
            latency_ms,
        })
    }
}

/// Rewrite a JSON-Schema style description into the OpenAPI subset Gemini
/// accepts: upper-case type names, no `additionalProperties` or `$schema`.
pub fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, value) in map {
                match (key.as_str(), value) {
                    ("additionalProperties" | "$schema", _) => {}
                    ("type", Value::String(t)) => {
                        out.insert(key.clone(), Value::String(t.to_uppercase()));
                    }
                    // Property names are keys here, not schema keywords.
                    ("properties", Value::Object(props)) => {
                        let props = props
                            .iter()
                            .map(|(name, prop)| (name.clone(), to_gemini_schema(prop)))
                            .collect();
                        out.insert(key.clone(), Value::Object(props));
                    }
                    _ => {
                        out.insert(key.clone(), to_gemini_schema(value));
                    }
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

/// Models occasionally wrap JSON in a Markdown fence despite the MIME type.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_types_upper_cased() {
        let schema = json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "type": { "type": "string", "description": "a field literally named type" },
                "items": {
                    "type": "array",
                    "items": { "type": "object", "properties": { "price": { "type": "number" } } }
                }
            },
            "required": ["type", "items"]
        });

        let converted = to_gemini_schema(&schema);
        assert_eq!(converted["type"], "OBJECT");
        assert!(converted.get("additionalProperties").is_none());
        assert_eq!(converted["properties"]["type"]["type"], "STRING");
        assert_eq!(converted["properties"]["items"]["items"]["type"], "OBJECT");
        assert_eq!(
            converted["properties"]["items"]["items"]["properties"]["price"]["type"],
            "NUMBER"
        );
        assert_eq!(converted["required"], json!(["type", "items"]));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  ```\n[]\n```  "), "[]");
    }

    #[test]
    fn test_part_serialization() {
        let text = serde_json::to_value(Part::Text { text: "hi".into() }).unwrap();
        assert_eq!(text, json!({ "text": "hi" }));

        let media = serde_json::to_value(Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/jpeg".into(),
                data: "AAEC".into(),
            },
        })
        .unwrap();
        assert_eq!(
            media,
            json!({ "inlineData": { "mimeType": "image/jpeg", "data": "AAEC" } })
        );
    }
}
