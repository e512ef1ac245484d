//! Log Redaction Layer
//!
//! Scrubs Google API keys, bearer tokens, and `key=` query parameters from
//! strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static GOOGLE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AIza[0-9A-Za-z_\-]{35}").expect("valid regex"));
static BEARER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9\-]{8,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").expect("valid regex")
});
static KEY_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&](?:key|api_key|token)=)[^&\s]+").expect("valid regex"));

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let mut redacted = GOOGLE_KEY_RE.replace_all(input, "[REDACTED_KEY]").to_string();

    redacted = BEARER_RE.replace_all(&redacted, "[REDACTED_TOKEN]").to_string();

    // Keep the parameter name so the URL stays readable.
    redacted = KEY_PARAM_RE
        .replace_all(&redacted, "${1}[REDACTED]")
        .to_string();

    redacted
}
