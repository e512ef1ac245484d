//! Docextract Gateway HTTP API Server
//!
//! Liveness at `/` and receipt extraction at `POST /api/extract/receipt`.

pub mod error;
pub mod extraction;
pub mod health;
pub mod server;

pub use error::ApiError;
pub use server::{GatewayState, build_router, start_server};
