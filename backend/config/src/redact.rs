//! Config redaction: produce safe-to-log config snapshots by masking secrets.

use serde_json::Value;

use crate::schema::AppConfig;

static SENSITIVE_KEYS: &[&str] = &["apiKey", "api_key", "token", "secret", "password"];

/// Serialize a config with every sensitive field masked.
pub fn redact(config: &AppConfig) -> Value {
    let value = serde_json::to_value(config).unwrap_or(Value::Null);
    redact_value(&value)
}

/// Redact a JSON value, replacing sensitive string fields with a short hint.
pub fn redact_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let v = match v {
                        Value::String(s) if is_sensitive_key(k) => mask(s),
                        other => redact_value(other),
                    };
                    (k.clone(), v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_value).collect()),
        other => other.clone(),
    }
}

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn mask(s: &str) -> Value {
    // Preserve length hint: show first 4 chars + ***
    let hint = match s.char_indices().nth(4) {
        Some((idx, _)) => format!("{}***", &s[..idx]),
        None => "***".to_string(),
    };
    Value::String(hint)
}
