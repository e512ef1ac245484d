//! Receipt extraction endpoint (`POST /api/extract/receipt`).

use axum::{Json, body::Bytes, extract::State};
use serde_json::Value;
use tracing::{debug, info};

use docextract_core::{DocextractError, ExtractionRequest, Receipt};

use crate::error::ApiError;
use crate::server::GatewayState;

pub const INVALID_IMAGE_URL_MESSAGE: &str =
    "Invalid input: \"imageUrl\" field is required and must be a string.";

/// Handler for `POST /api/extract/receipt`.
///
/// The body is read raw so that unparsable JSON, a non-object body, and a
/// missing or non-string `imageUrl` all produce the same 400.
pub async fn extract_receipt(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<Json<Receipt>, ApiError> {
    let image_url = image_url_from_body(&body).ok_or_else(|| {
        debug!(body_len = body.len(), "Rejected extraction request without imageUrl");
        DocextractError::InvalidInput(INVALID_IMAGE_URL_MESSAGE.to_string())
    })?;

    let receipt = state.service.extract_receipt_data(&image_url).await?;
    info!(vendor = %receipt.vendor, items = receipt.items.len(), "Extraction succeeded");
    Ok(Json(receipt))
}

/// Pull a non-empty string `imageUrl` out of a JSON object body.
fn image_url_from_body(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    // Structs also deserialize from arrays; only an object is a request.
    if !value.is_object() {
        return None;
    }
    let request: ExtractionRequest = serde_json::from_value(value).ok()?;
    Some(request.image_url).filter(|url| !url.is_empty())
}
