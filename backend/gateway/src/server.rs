//! Main HTTP Gateway Server.

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument, warn};

use docextract_agent::ExtractionService;

use crate::{extraction, health};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub service: ExtractionService,
}

impl GatewayState {
    pub fn new(service: ExtractionService) -> Self {
        Self { service }
    }
}

/// Build the router with all routes and middleware.
pub fn build_router(state: GatewayState) -> Router {
    let api = Router::new().route("/extract/receipt", post(extraction::extract_receipt));

    Router::new()
        .route("/", get(health::root))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the Axum HTTP server and serves until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: &str, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Server is running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C; shutting down");
        return;
    }
    info!("Shutdown signal received");
}
