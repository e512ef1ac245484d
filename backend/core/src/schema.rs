//! Receipt schema contract.
//!
//! [`receipt_schema`] is the shape handed to the model provider to constrain
//! generation. [`validate_receipt`] re-checks whatever comes back before it is
//! trusted as a [`Receipt`].

use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::types::Receipt;

const RECEIPT_FIELDS: [(&str, JsonType); 4] = [
    ("vendor", JsonType::String),
    ("date", JsonType::String),
    ("total", JsonType::Number),
    ("items", JsonType::Array),
];

const LINE_ITEM_FIELDS: [(&str, JsonType); 3] = [
    ("name", JsonType::String),
    ("quantity", JsonType::Number),
    ("price", JsonType::Number),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsonType {
    String,
    Number,
    Array,
    Object,
}

impl JsonType {
    fn as_str(self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            JsonType::String => value.is_string(),
            JsonType::Number => value.is_number(),
            JsonType::Array => value.is_array(),
            JsonType::Object => value.is_object(),
        }
    }
}

/// A provider response that does not fit the receipt shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {reason}")]
pub struct SchemaViolation {
    /// JSON path of the offending value, e.g. `items[1].price`.
    pub path: String,
    pub reason: String,
}

impl SchemaViolation {
    fn missing(path: String) -> Self {
        Self {
            path,
            reason: "required field is missing".to_string(),
        }
    }

    fn wrong_type(path: String, expected: JsonType, found: &Value) -> Self {
        Self {
            path,
            reason: format!("expected {}, found {}", expected.as_str(), type_name(found)),
        }
    }

    fn unexpected(path: String) -> Self {
        Self {
            path,
            reason: "unexpected field".to_string(),
        }
    }
}

/// Data-shape description of a [`Receipt`], with the field descriptions the
/// model sees.
pub fn receipt_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "vendor": {
                "type": "string",
                "description": "The name of the vendor or store"
            },
            "date": {
                "type": "string",
                "description": "The date of the receipt in ISO 8601 format (YYYY-MM-DD)"
            },
            "total": {
                "type": "number",
                "description": "The total amount of the receipt"
            },
            "items": {
                "type": "array",
                "description": "A list of items purchased",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Name of the item purchased"
                        },
                        "quantity": {
                            "type": "number",
                            "description": "Quantity of the item purchased"
                        },
                        "price": {
                            "type": "number",
                            "description": "Price of the item"
                        }
                    },
                    "required": ["name", "quantity", "price"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["vendor", "date", "total", "items"],
        "additionalProperties": false
    })
}

/// Check a provider response against the receipt shape and convert it.
///
/// Every field is required and no other keys are allowed, so an accepted
/// response serializes back to the same JSON.
pub fn validate_receipt(value: &Value) -> Result<Receipt, SchemaViolation> {
    let root = expect_object(value, "$")?;
    check_fields(root, &RECEIPT_FIELDS, "")?;

    if let Some(Value::Array(items)) = root.get("items") {
        for (i, item) in items.iter().enumerate() {
            let path = format!("items[{i}]");
            let item = expect_object(item, &path)?;
            check_fields(item, &LINE_ITEM_FIELDS, &path)?;
        }
    }

    serde_json::from_value(value.clone()).map_err(|e| {
        debug!(error = %e, "Receipt passed shape check but failed to deserialize");
        SchemaViolation {
            path: "$".to_string(),
            reason: e.to_string(),
        }
    })
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaViolation> {
    value
        .as_object()
        .ok_or_else(|| SchemaViolation::wrong_type(path.to_string(), JsonType::Object, value))
}

fn check_fields(
    object: &Map<String, Value>,
    fields: &[(&str, JsonType)],
    parent: &str,
) -> Result<(), SchemaViolation> {
    for (key, expected) in fields {
        let path = if parent.is_empty() {
            (*key).to_string()
        } else {
            format!("{parent}.{key}")
        };
        match object.get(*key) {
            None => return Err(SchemaViolation::missing(path)),
            Some(v) if !expected.matches(v) => {
                return Err(SchemaViolation::wrong_type(path, *expected, v))
            }
            Some(_) => {}
        }
    }
    if let Some(extra) = object.keys().find(|k| !fields.iter().any(|(f, _)| *f == k.as_str())) {
        let path = if parent.is_empty() {
            extra.clone()
        } else {
            format!("{parent}.{extra}")
        };
        return Err(SchemaViolation::unexpected(path));
    }
    Ok(())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
