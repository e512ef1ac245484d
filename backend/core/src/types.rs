use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One purchased item on a receipt.
///
/// Numbers keep the representation the model produced, so an integer
/// quantity is echoed back as an integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: Number,
    pub price: Number,
}

/// Structured record extracted from a receipt image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub vendor: String,
    /// `YYYY-MM-DD`, as instructed to the model. Not checked locally.
    pub date: String,
    pub total: Number,
    pub items: Vec<LineItem>,
}

/// Body of `POST /api/extract/receipt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    pub image_url: String,
}
