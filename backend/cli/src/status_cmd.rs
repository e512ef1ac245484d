//! CLI Status Command
//!
//! Probes the liveness endpoint of a running server.

use anyhow::{Context, Result};

/// GET `/` on `base_url` and return the liveness text.
pub async fn check(base_url: &str) -> Result<String> {
    let response = reqwest::get(format!("{}/", base_url.trim_end_matches('/')))
        .await
        .with_context(|| format!("Docextract is not reachable at {base_url}"))?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if !status.is_success() {
        anyhow::bail!("Docextract at {} answered {}: {}", base_url, status, body);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_check_reports_liveness_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body("Docextract API is running!");
            })
            .await;

        let body = check(&server.base_url()).await.unwrap();
        assert_eq!(body, "Docextract API is running!");
    }

    #[tokio::test]
    async fn test_check_fails_on_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(502);
            })
            .await;

        assert!(check(&server.base_url()).await.is_err());
    }
}
