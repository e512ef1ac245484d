//! HTTP error mapping.
//!
//! Every failure leaves the gateway as `{"error": "<message>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use docextract_core::DocextractError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// 400 with a fixed descriptive message.
    BadRequest(String),
    /// 500 carrying the service error's message.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => msg,
        }
    }
}

impl From<DocextractError> for ApiError {
    fn from(err: DocextractError) -> Self {
        match err {
            DocextractError::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
