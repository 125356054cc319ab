//! Error types for the API client and view backend
//!
//! The cache itself never fails; everything here comes from talking to the
//! remote API or from bad input to the backend.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == App Error Enum ==
#[derive(Error, Debug)]
pub enum AppError {
    /// Transport failure reaching the remote API
    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote API answered with a non-success status
    #[error("Upstream returned {status} for {path}")]
    UpstreamStatus { status: u16, path: String },

    /// The remote API answered with a body that is not JSON
    #[error("Invalid upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl AppError {
    /// HTTP status reported to callers of the view backend.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UpstreamStatus { status: 404, .. } | AppError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Request(_) | AppError::UpstreamStatus { .. } | AppError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(error = %self, "upstream failure");
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, AppError>;
