//! Liveness endpoint.

pub const LIVENESS_MESSAGE: &str = "Docextract API is running!";

/// Handler for `GET /`.
pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}
