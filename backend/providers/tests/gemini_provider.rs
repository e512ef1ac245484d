use std::io;
use std::sync::{Arc, Mutex};

use base64::{engine::general_purpose::STANDARD, Engine};
use httpmock::prelude::*;
use serde_json::json;

use docextract_core::{receipt_schema, LlmProvider, LlmRequest, PromptPart};
use docextract_providers::{GeminiProvider, GEMINI_20_FLASH_LITE};

const IMAGE_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

fn generate_path() -> String {
    format!("/v1beta/models/{}:generateContent", GEMINI_20_FLASH_LITE)
}

fn receipt_request(image_url: String) -> LlmRequest {
    LlmRequest {
        model: GEMINI_20_FLASH_LITE.to_string(),
        parts: vec![
            PromptPart::text("Extract the receipt."),
            PromptPart::media(image_url, "image/jpeg"),
        ],
        output_schema: Some(receipt_schema()),
    }
}

fn candidate_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_generate_inlines_image_and_parses_output() {
    let server = MockServer::start_async().await;

    let image = server
        .mock_async(|when, then| {
            when.method(GET).path("/receipt.jpg");
            then.status(200)
                .header("content-type", "image/jpeg")
                .body(IMAGE_BYTES);
        })
        .await;

    let receipt = json!({
        "vendor": "Blue Bottle",
        "date": "2024-02-10",
        "total": 9.5,
        "items": [{ "name": "Latte", "quantity": 1, "price": 9.5 }]
    });

    let generate = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(generate_path())
                .header("x-goog-api-key", "test-key")
                .body_contains("\"text\":\"Extract the receipt.\"")
                .body_contains(format!("\"data\":\"{}\"", STANDARD.encode(IMAGE_BYTES)))
                .body_contains("\"mimeType\":\"image/jpeg\"")
                .body_contains("\"responseMimeType\":\"application/json\"")
                .body_contains("\"type\":\"OBJECT\"");
            then.status(200).json_body(candidate_body(&receipt.to_string()));
        })
        .await;

    let provider = GeminiProvider::new("test-key").with_base_url(server.base_url());
    let response = provider
        .generate(&receipt_request(server.url("/receipt.jpg")))
        .await
        .unwrap();

    image.assert_async().await;
    generate.assert_async().await;
    assert_eq!(response.output, Some(receipt));
    assert_eq!(response.provider, "gemini");
    assert_eq!(response.model, GEMINI_20_FLASH_LITE);
}

#[tokio::test]
async fn test_unfetchable_image_is_an_error() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/missing.jpg");
            then.status(404);
        })
        .await;

    let generate = server
        .mock_async(|when, then| {
            when.method(POST).path(generate_path());
            then.status(200).json_body(candidate_body("{}"));
        })
        .await;

    let provider = GeminiProvider::new("test-key").with_base_url(server.base_url());
    let err = provider
        .generate(&receipt_request(server.url("/missing.jpg")))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("404"));
    assert_eq!(generate.hits_async().await, 0);
}

#[tokio::test]
async fn test_provider_error_status_is_an_error() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/receipt.jpg");
            then.status(200).body(IMAGE_BYTES);
        })
        .await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(generate_path());
            then.status(429)
                .json_body(json!({ "error": { "code": 429, "status": "RESOURCE_EXHAUSTED" } }));
        })
        .await;

    let provider = GeminiProvider::new("test-key").with_base_url(server.base_url());
    let err = provider
        .generate(&receipt_request(server.url("/receipt.jpg")))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn test_non_json_model_text_is_an_error() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/receipt.jpg");
            then.status(200).body(IMAGE_BYTES);
        })
        .await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(generate_path());
            then.status(200)
                .json_body(candidate_body("I could not read this receipt."));
        })
        .await;

    let provider = GeminiProvider::new("test-key").with_base_url(server.base_url());
    let err = provider
        .generate(&receipt_request(server.url("/receipt.jpg")))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("not valid JSON"));
}

#[tokio::test]
async fn test_empty_candidates_yield_no_output() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(generate_path());
            then.status(200).json_body(json!({ "candidates": [] }));
        })
        .await;

    let provider = GeminiProvider::new("test-key").with_base_url(server.base_url());
    let request = LlmRequest {
        model: GEMINI_20_FLASH_LITE.to_string(),
        parts: vec![PromptPart::text("Say nothing.")],
        output_schema: Some(receipt_schema()),
    };
    let response = provider.generate(&request).await.unwrap();

    assert!(response.output.is_none());
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_media_fetch_log_redacts_url_secret() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/signed.jpg");
            then.status(200).body(IMAGE_BYTES);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(generate_path());
            then.status(200).json_body(candidate_body("{}"));
        })
        .await;

    let provider = GeminiProvider::new("test-key").with_base_url(server.base_url());
    provider
        .generate(&receipt_request(server.url("/signed.jpg?token=SUPERSECRET123")))
        .await
        .unwrap();

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("Fetched media for prompt"));
    assert!(output.contains("token=[REDACTED]"));
    assert!(!output.contains("SUPERSECRET123"));
}
